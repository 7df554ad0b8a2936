//! Discord gateway integration.
//!
//! Runs automatic verification when a member joins the guild and serves the `auth`,
//! `staffauth` and `refreshtokens` slash commands.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability and slash command interactions
//! - `GUILD_MEMBERS` - Member join events (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod authenticate;
pub mod command;
pub mod editor;
pub mod handler;
pub mod start;
