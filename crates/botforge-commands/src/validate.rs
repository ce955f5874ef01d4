//! Descriptor validation against platform constraints.
//!
//! Validation is a pure function: a [`RawCommand`] either becomes a
//! canonical [`CommandDescriptor`] or is rejected with the offending field
//! and the constraint violated.  Malformed input is a normal, reportable
//! outcome here, never a panic.
//!
//! Checks run in a fixed order and short-circuit on the first failure, so
//! a given malformed input always produces the same rejection reason.

use std::time::Duration;

use crate::error::{CommandError, Result};
use crate::types::{CommandDescriptor, CommandOption, RawCommand};

/// Maximum command name length, in characters.
pub const MAX_NAME_CHARS: usize = 32;

/// Maximum command description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Maximum number of options per command.
pub const MAX_OPTIONS: usize = 25;

/// Validate a raw command, producing its canonical descriptor.
pub fn validate(raw: RawCommand) -> Result<CommandDescriptor> {
    // 1. The candidate must have a usable identity.
    let name = match raw.name {
        Some(ref name) if !name.trim().is_empty() => name.clone(),
        _ => {
            return Err(CommandError::Invalid {
                field: "name",
                reason: "required field is missing or blank".into(),
            });
        }
    };

    // 2. Name length.
    let name_chars = name.chars().count();
    if name_chars > MAX_NAME_CHARS {
        return Err(CommandError::Invalid {
            field: "name",
            reason: format!("must be 1-{MAX_NAME_CHARS} characters (got {name_chars})"),
        });
    }

    // 3. Description presence and length.
    let description = raw.description.clone().ok_or(CommandError::Invalid {
        field: "description",
        reason: "required field is missing".into(),
    })?;
    let description_chars = description.chars().count();
    if description_chars == 0 || description_chars > MAX_DESCRIPTION_CHARS {
        return Err(CommandError::Invalid {
            field: "description",
            reason: format!("must be 1-{MAX_DESCRIPTION_CHARS} characters (got {description_chars})"),
        });
    }

    // 4. Options: bounded count, every option named and described.
    let raw_options = raw.options.unwrap_or_default();
    if raw_options.len() > MAX_OPTIONS {
        return Err(CommandError::Invalid {
            field: "options",
            reason: format!("at most {MAX_OPTIONS} options allowed (got {})", raw_options.len()),
        });
    }

    let mut options = Vec::with_capacity(raw_options.len());
    for (index, opt) in raw_options.into_iter().enumerate() {
        let opt_name = match opt.name {
            Some(ref n) if !n.is_empty() => n.clone(),
            _ => {
                return Err(CommandError::Invalid {
                    field: "options",
                    reason: format!("option {index} is missing a name"),
                });
            }
        };
        let opt_description = match opt.description {
            Some(ref d) if !d.is_empty() => d.clone(),
            _ => {
                return Err(CommandError::Invalid {
                    field: "options",
                    reason: format!("option {index} (`{opt_name}`) is missing a description"),
                });
            }
        };
        options.push(CommandOption {
            name: opt_name,
            description: opt_description,
            extra: opt.extra,
        });
    }

    // A zero cooldown means "no throttle".
    let cooldown = raw
        .cooldown_ms
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis);

    Ok(CommandDescriptor {
        name,
        description,
        kind: raw.kind.unwrap_or_default(),
        options,
        cooldown,
        guild_only: raw.guild_only.unwrap_or(false),
        extra: raw.extra,
        source: None,
    })
}

/// Re-check an already-canonical descriptor against the same constraints,
/// in the same order.
///
/// Used by `validate_on_sync`: descriptors are immutable once registered,
/// but a caller may still want the platform constraints re-asserted right
/// before submission.
pub fn check(descriptor: &CommandDescriptor) -> Result<()> {
    let name_chars = descriptor.name.chars().count();
    if descriptor.name.trim().is_empty() {
        return Err(CommandError::Invalid {
            field: "name",
            reason: "required field is missing or blank".into(),
        });
    }
    if name_chars > MAX_NAME_CHARS {
        return Err(CommandError::Invalid {
            field: "name",
            reason: format!("must be 1-{MAX_NAME_CHARS} characters (got {name_chars})"),
        });
    }

    let description_chars = descriptor.description.chars().count();
    if description_chars == 0 || description_chars > MAX_DESCRIPTION_CHARS {
        return Err(CommandError::Invalid {
            field: "description",
            reason: format!("must be 1-{MAX_DESCRIPTION_CHARS} characters (got {description_chars})"),
        });
    }

    if descriptor.options.len() > MAX_OPTIONS {
        return Err(CommandError::Invalid {
            field: "options",
            reason: format!("at most {MAX_OPTIONS} options allowed (got {})", descriptor.options.len()),
        });
    }
    for (index, opt) in descriptor.options.iter().enumerate() {
        if opt.name.is_empty() {
            return Err(CommandError::Invalid {
                field: "options",
                reason: format!("option {index} is missing a name"),
            });
        }
        if opt.description.is_empty() {
            return Err(CommandError::Invalid {
                field: "options",
                reason: format!("option {index} (`{}`) is missing a description", opt.name),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommandKind, RawOption};

    fn raw(name: &str, description: &str) -> RawCommand {
        RawCommand {
            name: Some(name.into()),
            description: Some(description.into()),
            ..RawCommand::default()
        }
    }

    fn reason(err: CommandError) -> (&'static str, String) {
        match err {
            CommandError::Invalid { field, reason } => (field, reason),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn accepts_minimal_command() {
        let desc = validate(raw("ping", "Measure latency.")).unwrap();
        assert_eq!(desc.name, "ping");
        assert_eq!(desc.kind, CommandKind::ChatInput);
        assert!(desc.options.is_empty());
        assert_eq!(desc.cooldown, None);
    }

    #[test]
    fn rejects_missing_name() {
        let (field, reason) = reason(validate(RawCommand::default()).unwrap_err());
        assert_eq!(field, "name");
        assert_eq!(reason, "required field is missing or blank");
    }

    #[test]
    fn rejects_blank_name() {
        let (field, _) = reason(validate(raw("   ", "desc")).unwrap_err());
        assert_eq!(field, "name");
    }

    #[test]
    fn rejects_long_name() {
        let (field, reason) = reason(validate(raw(&"x".repeat(33), "desc")).unwrap_err());
        assert_eq!(field, "name");
        assert_eq!(reason, "must be 1-32 characters (got 33)");
    }

    #[test]
    fn accepts_32_char_name() {
        assert!(validate(raw(&"x".repeat(32), "desc")).is_ok());
    }

    #[test]
    fn rejects_missing_description() {
        let mut candidate = raw("ping", "");
        candidate.description = None;
        let (field, reason) = reason(validate(candidate).unwrap_err());
        assert_eq!(field, "description");
        assert_eq!(reason, "required field is missing");
    }

    #[test]
    fn rejects_empty_and_long_description() {
        let (field, why) = reason(validate(raw("ping", "")).unwrap_err());
        assert_eq!(field, "description");
        assert_eq!(why, "must be 1-100 characters (got 0)");

        let (_, why) = reason(validate(raw("ping", &"d".repeat(101))).unwrap_err());
        assert_eq!(why, "must be 1-100 characters (got 101)");
    }

    #[test]
    fn name_check_wins_over_description_check() {
        // Both fields are bad; the fixed ordering reports the name first.
        let candidate = RawCommand {
            name: Some("".into()),
            description: None,
            ..RawCommand::default()
        };
        let (field, _) = reason(validate(candidate).unwrap_err());
        assert_eq!(field, "name");
    }

    #[test]
    fn rejects_too_many_options() {
        let mut candidate = raw("roll", "Roll dice.");
        candidate.options = Some(
            (0..26)
                .map(|i| RawOption {
                    name: Some(format!("opt{i}")),
                    description: Some("An option.".into()),
                    ..RawOption::default()
                })
                .collect(),
        );
        let (field, reason) = reason(validate(candidate).unwrap_err());
        assert_eq!(field, "options");
        assert_eq!(reason, "at most 25 options allowed (got 26)");
    }

    #[test]
    fn rejects_unnamed_option() {
        let mut candidate = raw("roll", "Roll dice.");
        candidate.options = Some(vec![RawOption::default()]);
        let (field, reason) = reason(validate(candidate).unwrap_err());
        assert_eq!(field, "options");
        assert_eq!(reason, "option 0 is missing a name");
    }

    #[test]
    fn rejects_undescribed_option() {
        let mut candidate = raw("roll", "Roll dice.");
        candidate.options = Some(vec![
            RawOption {
                name: Some("sides".into()),
                description: Some("Number of sides.".into()),
                ..RawOption::default()
            },
            RawOption {
                name: Some("count".into()),
                description: None,
                ..RawOption::default()
            },
        ]);
        let (field, reason) = reason(validate(candidate).unwrap_err());
        assert_eq!(field, "options");
        assert_eq!(reason, "option 1 (`count`) is missing a description");
    }

    #[test]
    fn check_agrees_with_validate() {
        let mut desc = validate(raw("ping", "Measure latency.")).unwrap();
        assert!(check(&desc).is_ok());

        desc.description = "d".repeat(101);
        let (field, reason) = reason(check(&desc).unwrap_err());
        assert_eq!(field, "description");
        assert_eq!(reason, "must be 1-100 characters (got 101)");
    }

    #[test]
    fn zero_cooldown_normalizes_to_none() {
        let mut candidate = raw("ping", "Measure latency.");
        candidate.cooldown_ms = Some(0);
        assert_eq!(validate(candidate).unwrap().cooldown, None);

        let mut candidate = raw("ping", "Measure latency.");
        candidate.cooldown_ms = Some(5000);
        assert_eq!(
            validate(candidate).unwrap().cooldown,
            Some(Duration::from_millis(5000))
        );
    }
}
