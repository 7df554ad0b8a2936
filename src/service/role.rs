//! Role and nickname assignment.
//!
//! `RoleAssignor` is a pure mapping from an IVAO profile to the roles and nickname a
//! member should have. `apply_assignment` then performs each edit independently
//! through a `MemberEditor` and reports every outcome.

use serenity::async_trait;

use crate::{
    config::{DivisionConfig, DivisionRoles},
    error::member::MemberEditError,
    model::{
        member::MemberSubject,
        profile::Profile,
        role::{MemberMutation, MutationOutcome, MutationReport, RoleAssignment},
    },
};

/// Discord's nickname length limit, in characters.
pub const MAX_NICKNAME_LEN: usize = 32;

/// Audit log reason attached to role grants.
pub const AUDIT_REASON: &str = "IVAO authentication";

#[derive(Clone, Copy)]
enum Department {
    /// Director level, grants every department role.
    All,
    SpecOps,
    FlightOps,
    AtcOps,
    Training,
    Web,
    Membership,
    Event,
    PublicRelations,
}

/// Staff position suffixes recognised after the `<division>-` prefix.
const POSITIONS: [(&str, Department); 26] = [
    ("DIR", Department::All),
    ("ADIR", Department::All),
    ("SOC", Department::SpecOps),
    ("SOAC", Department::SpecOps),
    ("SOA1", Department::SpecOps),
    ("FOC", Department::FlightOps),
    ("FOAC", Department::FlightOps),
    ("FOA1", Department::FlightOps),
    ("AOC", Department::AtcOps),
    ("AOAC", Department::AtcOps),
    ("AOA1", Department::AtcOps),
    ("TC", Department::Training),
    ("TAC", Department::Training),
    ("TA1", Department::Training),
    ("WM", Department::Web),
    ("AWM", Department::Web),
    ("WMA1", Department::Web),
    ("MC", Department::Membership),
    ("MAC", Department::Membership),
    ("MA1", Department::Membership),
    ("EC", Department::Event),
    ("EAC", Department::Event),
    ("EA1", Department::Event),
    ("PRC", Department::PublicRelations),
    ("PRAC", Department::PublicRelations),
    ("PRA1", Department::PublicRelations),
];

impl Department {
    fn roles(self, roles: &DivisionRoles) -> Vec<u64> {
        let department = match self {
            Self::All => {
                return vec![
                    roles.staff,
                    roles.hq,
                    roles.specops,
                    roles.flightops,
                    roles.atcops,
                    roles.training,
                    roles.web,
                    roles.membership,
                    roles.event,
                    roles.pr,
                ]
            }
            Self::SpecOps => roles.specops,
            Self::FlightOps => roles.flightops,
            Self::AtcOps => roles.atcops,
            Self::Training => roles.training,
            Self::Web => roles.web,
            Self::Membership => roles.membership,
            Self::Event => roles.event,
            Self::PublicRelations => roles.pr,
        };

        vec![roles.staff, department]
    }
}

/// Maps verified profiles to role grants and nicknames for one division.
pub struct RoleAssignor<'a> {
    division: &'a DivisionConfig,
}

impl<'a> RoleAssignor<'a> {
    pub fn new(division: &'a DivisionConfig) -> Self {
        Self { division }
    }

    /// Computes the roles to add and the nickname for `member`.
    ///
    /// - Home-division staff get the roles of every recognised position plus the
    ///   division member and verified roles, and a `<name> | <div>-<POS/POS>` nickname
    ///   that degrades to `<name> | <div> Staff`.
    /// - Staff of another division get verified and non-division roles.
    /// - Everyone else gets division member or non-division, plus verified.
    ///
    /// Non home-staff nicknames are `<name> | <vid>`, degrading to the username form.
    /// Roles the member already holds are left out.
    pub fn assign(&self, profile: &Profile, member: &MemberSubject) -> RoleAssignment {
        let roles = &self.division.roles;
        let div = self.division.division.as_str();
        let is_home = profile.division_id.as_deref() == Some(div);
        let name = profile
            .full_name()
            .unwrap_or_else(|| member.username.clone());

        let (wanted, nickname) = if profile.is_staff && is_home {
            let (mut wanted, abbreviations) = self.staff_positions(profile);
            if !abbreviations.is_empty() {
                wanted.push(roles.div_member);
                wanted.push(roles.vid_verified);
            }

            let composed = format!("{} | {}-{}", name, div, abbreviations.join("/"));
            let nickname = if !abbreviations.is_empty() && fits(&composed) {
                composed
            } else {
                staff_nickname(&name, &member.username, div)
            };

            (wanted, nickname)
        } else if profile.is_staff {
            (
                vec![roles.vid_verified, roles.non_div_member],
                member_nickname(&name, &member.username, &profile.vid),
            )
        } else {
            let base = if is_home {
                roles.div_member
            } else {
                roles.non_div_member
            };
            (
                vec![base, roles.vid_verified],
                member_nickname(&name, &member.username, &profile.vid),
            )
        };

        let mut roles_to_add: Vec<u64> = Vec::with_capacity(wanted.len());
        for role in wanted {
            if !member.has_role(role) && !roles_to_add.contains(&role) {
                roles_to_add.push(role);
            }
        }

        RoleAssignment {
            roles_to_add,
            nickname,
        }
    }

    /// Roles and nickname abbreviations for the home-division positions in `profile`.
    fn staff_positions(&self, profile: &Profile) -> (Vec<u64>, Vec<&'static str>) {
        let mut roles = Vec::new();
        let mut abbreviations: Vec<&'static str> = Vec::new();

        for code in profile.position_codes() {
            let Some(suffix) = code
                .strip_prefix(self.division.division.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
            else {
                continue;
            };
            let Some((abbreviation, department)) =
                POSITIONS.iter().find(|(abbr, _)| *abbr == suffix)
            else {
                continue;
            };

            roles.extend(department.roles(&self.division.roles));
            if !abbreviations.contains(abbreviation) {
                abbreviations.push(abbreviation);
            }
        }

        (roles, abbreviations)
    }
}

fn fits(nickname: &str) -> bool {
    nickname.chars().count() <= MAX_NICKNAME_LEN
}

/// First candidate that fits, else the last one cut to the limit.
fn first_fitting(primary: String, fallback: String) -> String {
    if fits(&primary) {
        primary
    } else if fits(&fallback) {
        fallback
    } else {
        fallback.chars().take(MAX_NICKNAME_LEN).collect()
    }
}

fn staff_nickname(name: &str, username: &str, div: &str) -> String {
    first_fitting(
        format!("{} | {} Staff", name, div),
        format!("{} | {} Staff", username, div),
    )
}

fn member_nickname(name: &str, username: &str, vid: &str) -> String {
    first_fitting(
        format!("{} | {}", name, vid),
        format!("{} | {}", username, vid),
    )
}

/// Applies edits to a single guild member.
#[async_trait]
pub trait MemberEditor: Send + Sync {
    async fn add_role(&self, role_id: u64, reason: &str) -> Result<(), MemberEditError>;

    async fn set_nickname(&self, nickname: &str) -> Result<(), MemberEditError>;
}

/// Performs every role grant and then the nickname edit.
///
/// Each edit is attempted regardless of how the previous ones went.
pub async fn apply_assignment(
    editor: &dyn MemberEditor,
    assignment: &RoleAssignment,
) -> MutationReport {
    let mut report = MutationReport::default();

    for &role_id in &assignment.roles_to_add {
        let outcome = MutationOutcome::from(editor.add_role(role_id, AUDIT_REASON).await);
        log_outcome(&format!("add role {}", role_id), &outcome);
        report.push(MemberMutation::AddRole(role_id), outcome);
    }

    let outcome = MutationOutcome::from(editor.set_nickname(&assignment.nickname).await);
    log_outcome(&format!("set nickname '{}'", assignment.nickname), &outcome);
    report.push(
        MemberMutation::SetNickname(assignment.nickname.clone()),
        outcome,
    );

    report
}

fn log_outcome(action: &str, outcome: &MutationOutcome) {
    match outcome {
        MutationOutcome::Applied => {}
        MutationOutcome::PermissionDenied => {
            tracing::error!("Missing permissions to {}", action)
        }
        MutationOutcome::Failed(message) => {
            tracing::warn!("Could not {}: {}", action, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profile::StaffPosition;
    use std::sync::Mutex;

    const STAFF: u64 = 1;
    const HQ: u64 = 2;
    const SPECOPS: u64 = 3;
    const FLIGHTOPS: u64 = 4;
    const ATCOPS: u64 = 5;
    const TRAINING: u64 = 6;
    const WEB: u64 = 7;
    const MEMBERSHIP: u64 = 8;
    const EVENT: u64 = 9;
    const PR: u64 = 10;
    const VERIFIED: u64 = 11;
    const DIV_MEMBER: u64 = 12;
    const NON_DIV: u64 = 13;

    fn division() -> DivisionConfig {
        DivisionConfig {
            division: "XM".to_string(),
            country: "Mexico".to_string(),
            roles: DivisionRoles {
                staff: STAFF,
                hq: HQ,
                specops: SPECOPS,
                flightops: FLIGHTOPS,
                atcops: ATCOPS,
                training: TRAINING,
                web: WEB,
                membership: MEMBERSHIP,
                event: EVENT,
                pr: PR,
                vid_verified: VERIFIED,
                div_member: DIV_MEMBER,
                non_div_member: NON_DIV,
            },
        }
    }

    fn profile(division: &str, is_staff: bool, positions: &[&str]) -> Profile {
        Profile {
            vid: "123456".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            division_id: Some(division.to_string()),
            is_staff,
            user_staff_positions: positions
                .iter()
                .map(|id| StaffPosition { id: id.to_string() })
                .collect(),
        }
    }

    fn member(role_ids: Vec<u64>) -> MemberSubject {
        MemberSubject {
            discord_id: 42,
            username: "janedoe".to_string(),
            display_name: "janedoe".to_string(),
            role_ids,
        }
    }

    #[test]
    fn home_member_gets_division_and_verified() {
        let division = division();
        let assignment =
            RoleAssignor::new(&division).assign(&profile("XM", false, &[]), &member(vec![]));

        assert_eq!(assignment.roles_to_add, vec![DIV_MEMBER, VERIFIED]);
        assert_eq!(assignment.nickname, "Jane Doe | 123456");
    }

    #[test]
    fn foreign_member_gets_non_division() {
        let division = division();
        let assignment =
            RoleAssignor::new(&division).assign(&profile("BR", false, &[]), &member(vec![]));

        assert_eq!(assignment.roles_to_add, vec![NON_DIV, VERIFIED]);
    }

    #[test]
    fn foreign_staff_gets_no_staff_roles() {
        let division = division();
        let assignment = RoleAssignor::new(&division)
            .assign(&profile("BR", true, &["BR-DIR"]), &member(vec![]));

        assert_eq!(assignment.roles_to_add, vec![VERIFIED, NON_DIV]);
        assert_eq!(assignment.nickname, "Jane Doe | 123456");
    }

    #[test]
    fn two_department_chiefs_get_both_departments() {
        let division = division();
        let assignment = RoleAssignor::new(&division).assign(
            &profile("XM", true, &["XM-SOC", "XM-TC"]),
            &member(vec![]),
        );

        assert_eq!(
            assignment.roles_to_add,
            vec![STAFF, SPECOPS, TRAINING, DIV_MEMBER, VERIFIED]
        );
        assert_eq!(assignment.nickname, "Jane Doe | XM-SOC/TC");
    }

    #[test]
    fn director_gets_every_department() {
        let division = division();
        let assignment =
            RoleAssignor::new(&division).assign(&profile("XM", true, &["XM-DIR"]), &member(vec![]));

        assert_eq!(
            assignment.roles_to_add,
            vec![
                STAFF, HQ, SPECOPS, FLIGHTOPS, ATCOPS, TRAINING, WEB, MEMBERSHIP, EVENT, PR,
                DIV_MEMBER, VERIFIED
            ]
        );
    }

    #[test]
    fn ignores_positions_of_other_divisions() {
        let division = division();
        let assignment = RoleAssignor::new(&division).assign(
            &profile("XM", true, &["BR-SOC", "XM-UNKNOWN", "XMSOC"]),
            &member(vec![]),
        );

        assert!(assignment.roles_to_add.is_empty());
        assert_eq!(assignment.nickname, "Jane Doe | XM Staff");
    }

    #[test]
    fn skips_roles_already_held() {
        let division = division();
        let assignment = RoleAssignor::new(&division).assign(
            &profile("XM", true, &["XM-SOC"]),
            &member(vec![STAFF, VERIFIED]),
        );

        assert_eq!(assignment.roles_to_add, vec![SPECOPS, DIV_MEMBER]);
    }

    #[test]
    fn repeated_position_is_listed_once() {
        let division = division();
        let assignment = RoleAssignor::new(&division).assign(
            &profile("XM", true, &["XM-SOC", "XM-SOC"]),
            &member(vec![]),
        );

        assert_eq!(assignment.nickname, "Jane Doe | XM-SOC");
        assert_eq!(
            assignment.roles_to_add,
            vec![STAFF, SPECOPS, DIV_MEMBER, VERIFIED]
        );
    }

    #[test]
    fn long_staff_nickname_falls_back() {
        let division = division();
        let assignment = RoleAssignor::new(&division).assign(
            &profile(
                "XM",
                true,
                &["XM-SOC", "XM-FOAC", "XM-TA1", "XM-PRAC", "XM-AOA1"],
            ),
            &member(vec![]),
        );

        assert_eq!(assignment.nickname, "Jane Doe | XM Staff");
    }

    #[test]
    fn missing_name_uses_username() {
        let division = division();
        let mut profile = profile("XM", false, &[]);
        profile.last_name = None;

        let assignment = RoleAssignor::new(&division).assign(&profile, &member(vec![]));

        assert_eq!(assignment.nickname, "janedoe | 123456");
    }

    #[test]
    fn long_name_degrades_to_username_then_truncates() {
        let division = division();
        let mut long = profile("XM", false, &[]);
        long.first_name = Some("Maximiliano Alejandro".to_string());
        long.last_name = Some("Hernandez".to_string());

        let assignment = RoleAssignor::new(&division).assign(&long, &member(vec![]));
        assert_eq!(assignment.nickname, "janedoe | 123456");

        let mut subject = member(vec![]);
        subject.username = "a_really_long_discord_username_x".to_string();
        let assignment = RoleAssignor::new(&division).assign(&long, &subject);
        assert_eq!(assignment.nickname.chars().count(), MAX_NICKNAME_LEN);
        assert!(assignment.nickname.starts_with("a_really_long_discord_username_x"));
    }

    #[test]
    fn nickname_never_exceeds_limit() {
        let division = division();
        let codes = ["XM-SOC", "XM-FOAC", "XM-AOA1", "XM-WMA1", "XM-PRAC", "XM-ADIR"];

        for name_len in 1..40 {
            for code_count in 0..=codes.len() {
                let mut staff = profile("XM", code_count > 0, &codes[..code_count]);
                staff.first_name = Some("J".repeat(name_len));
                staff.last_name = Some("D".to_string());
                let full = format!("{} D", "J".repeat(name_len));

                let assignment = RoleAssignor::new(&division).assign(&staff, &member(vec![]));

                assert!(assignment.nickname.chars().count() <= MAX_NICKNAME_LEN);
                if code_count > 0 {
                    let composed = format!(
                        "{} | XM-{}",
                        full,
                        codes[..code_count]
                            .iter()
                            .map(|c| c.trim_start_matches("XM-"))
                            .collect::<Vec<_>>()
                            .join("/")
                    );
                    if composed.chars().count() > MAX_NICKNAME_LEN {
                        assert_ne!(assignment.nickname, composed);
                        assert!(assignment.nickname.ends_with(" | XM Staff"));
                    } else {
                        assert_eq!(assignment.nickname, composed);
                    }
                }
            }
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        let division = division();
        let mut accented = profile("XM", false, &[]);
        accented.first_name = Some("José Ángel".to_string());
        accented.last_name = Some("Núñez Peña".to_string());

        let assignment = RoleAssignor::new(&division).assign(&accented, &member(vec![]));

        assert_eq!(assignment.nickname, "José Ángel Núñez Peña | 123456");
    }

    struct RecordingEditor {
        denied_roles: Vec<u64>,
        fail_nickname: bool,
        calls: Mutex<Vec<MemberMutation>>,
    }

    #[async_trait]
    impl MemberEditor for RecordingEditor {
        async fn add_role(&self, role_id: u64, reason: &str) -> Result<(), MemberEditError> {
            assert_eq!(reason, AUDIT_REASON);
            self.calls.lock().unwrap().push(MemberMutation::AddRole(role_id));
            if self.denied_roles.contains(&role_id) {
                Err(MemberEditError::PermissionDenied)
            } else {
                Ok(())
            }
        }

        async fn set_nickname(&self, nickname: &str) -> Result<(), MemberEditError> {
            self.calls
                .lock()
                .unwrap()
                .push(MemberMutation::SetNickname(nickname.to_string()));
            if self.fail_nickname {
                Err(MemberEditError::Failed("Invalid Form Body".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn denied_grant_does_not_abort_others() {
        let editor = RecordingEditor {
            denied_roles: vec![STAFF],
            fail_nickname: true,
            calls: Mutex::new(Vec::new()),
        };
        let assignment = RoleAssignment {
            roles_to_add: vec![STAFF, SPECOPS],
            nickname: "Jane Doe | XM-SOC".to_string(),
        };

        let report = apply_assignment(&editor, &assignment).await;

        assert_eq!(editor.calls.lock().unwrap().len(), 3);
        assert_eq!(report.applied(), 1);
        assert_eq!(report.denied(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.entries[0],
            (MemberMutation::AddRole(STAFF), MutationOutcome::PermissionDenied)
        );
    }
}
