//! Recognized security event categories.
//!
//! SECURITY: every category has a fixed severity, event id layout and
//! description template. Callers only supply the discriminating arguments,
//! so two emitters of the same event always agree on how it reads.

use std::collections::HashMap;

use super::{EventError, Severity};

/// A recognized security event together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityEvent {
    /// Successful login after one or more failures.
    AuthnLoginSuccessAfterFail { user: String, failures: u32 },
    /// Failed login.
    AuthnLoginFail { user: String },
    /// Failed login limit reached.
    AuthnLoginFailMax { user: String, fail_limit: u32 },
    /// Account locked out after too many failed logins.
    AuthnLoginLock { user: String },
    /// Password changed.
    AuthnPasswordChange { user: String },
    /// Password change failed.
    AuthnPasswordChangeFail { user: String },
    /// Token created.
    AuthnTokenCreated { user: String, permissions: Vec<String> },
    /// Token revoked.
    AuthnTokenRevoked { user: String, token_id: String },
    /// Token deleted.
    AuthnTokenDelete { user: String },
    /// Access to a resource without entitlement.
    AuthzFail { user: String },
    /// Administrative privilege change.
    AuthzAdmin { admin: String, user: String },
    SysStartup { user: String },
    SysShutdown { user: String },
    SysRestart { user: String },
    SysCrash { reason: String },
    /// Monitoring disabled.
    SysMonitorDisabled { user: String, service: String },
    /// User created by an administrator.
    UserCreated {
        admin: String,
        user: String,
        permissions: Vec<String>,
    },
    /// User privileges updated by an administrator.
    UserUpdated {
        admin: String,
        user: String,
        permissions: Vec<String>,
    },
}

impl SecurityEvent {
    /// Every recognized category name, in declaration order.
    pub const CATEGORIES: &'static [&'static str] = &[
        "authn_login_successafterfail",
        "authn_login_fail",
        "authn_login_fail_max",
        "authn_login_lock",
        "authn_password_change",
        "authn_password_change_fail",
        "authn_token_created",
        "authn_token_revoked",
        "authn_token_delete",
        "authz_fail",
        "authz_admin",
        "sys_startup",
        "sys_shutdown",
        "sys_restart",
        "sys_crash",
        "sys_monitor_disabled",
        "user_created",
        "user_updated",
    ];

    /// Category name, the prefix of the event id.
    pub fn category(&self) -> &'static str {
        match self {
            Self::AuthnLoginSuccessAfterFail { .. } => "authn_login_successafterfail",
            Self::AuthnLoginFail { .. } => "authn_login_fail",
            Self::AuthnLoginFailMax { .. } => "authn_login_fail_max",
            Self::AuthnLoginLock { .. } => "authn_login_lock",
            Self::AuthnPasswordChange { .. } => "authn_password_change",
            Self::AuthnPasswordChangeFail { .. } => "authn_password_change_fail",
            Self::AuthnTokenCreated { .. } => "authn_token_created",
            Self::AuthnTokenRevoked { .. } => "authn_token_revoked",
            Self::AuthnTokenDelete { .. } => "authn_token_delete",
            Self::AuthzFail { .. } => "authz_fail",
            Self::AuthzAdmin { .. } => "authz_admin",
            Self::SysStartup { .. } => "sys_startup",
            Self::SysShutdown { .. } => "sys_shutdown",
            Self::SysRestart { .. } => "sys_restart",
            Self::SysCrash { .. } => "sys_crash",
            Self::SysMonitorDisabled { .. } => "sys_monitor_disabled",
            Self::UserCreated { .. } => "user_created",
            Self::UserUpdated { .. } => "user_updated",
        }
    }

    /// Get the severity level for this event.
    pub fn severity(&self) -> Severity {
        match self {
            Self::AuthnLoginSuccessAfterFail { .. }
            | Self::AuthnPasswordChange { .. }
            | Self::AuthnTokenCreated { .. }
            | Self::AuthnTokenRevoked { .. } => Severity::Info,
            Self::AuthnPasswordChangeFail { .. } | Self::AuthzFail { .. } => Severity::Critical,
            Self::AuthnLoginFail { .. }
            | Self::AuthnLoginFailMax { .. }
            | Self::AuthnLoginLock { .. }
            | Self::AuthnTokenDelete { .. }
            | Self::AuthzAdmin { .. }
            | Self::SysStartup { .. }
            | Self::SysShutdown { .. }
            | Self::SysRestart { .. }
            | Self::SysCrash { .. }
            | Self::SysMonitorDisabled { .. }
            | Self::UserCreated { .. }
            | Self::UserUpdated { .. } => Severity::Warning,
        }
    }

    /// Event id: the category name, a colon, then the arguments joined by
    /// commas in a fixed order.
    pub fn event_id(&self) -> String {
        let args: Vec<String> = match self {
            Self::AuthnLoginSuccessAfterFail { user, failures } => {
                vec![user.clone(), failures.to_string()]
            }
            Self::AuthnLoginFail { user }
            | Self::AuthnPasswordChange { user }
            | Self::AuthnPasswordChangeFail { user }
            | Self::AuthnTokenDelete { user }
            | Self::SysStartup { user }
            | Self::SysShutdown { user }
            | Self::SysRestart { user } => vec![user.clone()],
            Self::AuthnLoginFailMax { user, fail_limit } => {
                vec![user.clone(), fail_limit.to_string()]
            }
            Self::AuthnLoginLock { user } => vec![user.clone(), "maxretries".to_string()],
            Self::AuthnTokenCreated { user, permissions } => {
                vec![user.clone(), permissions.join(",")]
            }
            Self::AuthnTokenRevoked { user, token_id } => vec![user.clone(), token_id.clone()],
            Self::AuthzFail { user } => vec![user.clone(), "resource".to_string()],
            Self::AuthzAdmin { user, .. } => {
                vec![user.clone(), "user_privilege_change".to_string()]
            }
            Self::SysCrash { reason } => vec![reason.clone()],
            Self::SysMonitorDisabled { user, service } => vec![user.clone(), service.clone()],
            Self::UserCreated {
                admin,
                user,
                permissions,
            }
            | Self::UserUpdated {
                admin,
                user,
                permissions,
            } => vec![admin.clone(), user.clone(), permissions.join(",")],
        };

        format!("{}:{}", self.category(), args.join(","))
    }

    /// Human-readable description from the category's template.
    pub fn description(&self) -> String {
        match self {
            Self::AuthnLoginSuccessAfterFail { user, failures } => {
                format!("User {} login successfully after {} failures", user, failures)
            }
            Self::AuthnLoginFail { user } => format!("User {} login failed", user),
            Self::AuthnLoginFailMax { user, fail_limit } => {
                format!("User {} reached the login fail limit of {}", user, fail_limit)
            }
            Self::AuthnLoginLock { user } => {
                format!("User {} login locked because maxretries exceeded", user)
            }
            Self::AuthnPasswordChange { user } => {
                format!("User {} has successfully changed their password", user)
            }
            Self::AuthnPasswordChangeFail { user } => {
                format!("User {} failed to change their password", user)
            }
            Self::AuthnTokenCreated { user, permissions } => format!(
                "A token has been created for {} with {}",
                user,
                permissions.join(",")
            ),
            Self::AuthnTokenRevoked { user, token_id } => {
                format!("Token ID: {} was revoked for user {}", token_id, user)
            }
            Self::AuthnTokenDelete { user } => format!("The token for {} has been deleted", user),
            Self::AuthzFail { user } => format!(
                "User {} attempted to access a resource without entitlement",
                user
            ),
            Self::AuthzAdmin { admin, user } => format!(
                "Administrator {} has updated privileges of user {} from user to admin",
                admin, user
            ),
            Self::SysStartup { user } => format!("User {} spawned a new instance", user),
            Self::SysShutdown { user } => format!("User {} stopped this instance", user),
            Self::SysRestart { user } => format!("User {} initiated a restart", user),
            Self::SysCrash { reason } => format!("The system crashed due to {} error", reason),
            Self::SysMonitorDisabled { user, service } => {
                format!("User {} has disabled {}", user, service)
            }
            Self::UserCreated {
                admin,
                user,
                permissions,
            } => format!(
                "User {} created {} with {} privilege attributes",
                admin,
                user,
                permissions.join(",")
            ),
            Self::UserUpdated {
                admin,
                user,
                permissions,
            } => format!(
                "User {} updated {} with {} privilege attributes",
                admin,
                user,
                permissions.join(",")
            ),
        }
    }

    /// Build an event from a category name and string arguments.
    ///
    /// `permissions` is read as a comma-separated list; `failures` and
    /// `fail_limit` must parse as non-negative integers.
    pub fn from_args(category: &str, args: &HashMap<String, String>) -> Result<Self, EventError> {
        let lookup = ArgLookup { category, args };

        let event = match category {
            "authn_login_successafterfail" => Self::AuthnLoginSuccessAfterFail {
                user: lookup.string("user")?,
                failures: lookup.count("failures")?,
            },
            "authn_login_fail" => Self::AuthnLoginFail {
                user: lookup.string("user")?,
            },
            "authn_login_fail_max" => Self::AuthnLoginFailMax {
                user: lookup.string("user")?,
                fail_limit: lookup.count("fail_limit")?,
            },
            "authn_login_lock" => Self::AuthnLoginLock {
                user: lookup.string("user")?,
            },
            "authn_password_change" => Self::AuthnPasswordChange {
                user: lookup.string("user")?,
            },
            "authn_password_change_fail" => Self::AuthnPasswordChangeFail {
                user: lookup.string("user")?,
            },
            "authn_token_created" => Self::AuthnTokenCreated {
                user: lookup.string("user")?,
                permissions: lookup.list("permissions")?,
            },
            "authn_token_revoked" => Self::AuthnTokenRevoked {
                user: lookup.string("user")?,
                token_id: lookup.string("token_id")?,
            },
            "authn_token_delete" => Self::AuthnTokenDelete {
                user: lookup.string("user")?,
            },
            "authz_fail" => Self::AuthzFail {
                user: lookup.string("user")?,
            },
            "authz_admin" => Self::AuthzAdmin {
                admin: lookup.string("admin")?,
                user: lookup.string("user")?,
            },
            "sys_startup" => Self::SysStartup {
                user: lookup.string("user")?,
            },
            "sys_shutdown" => Self::SysShutdown {
                user: lookup.string("user")?,
            },
            "sys_restart" => Self::SysRestart {
                user: lookup.string("user")?,
            },
            "sys_crash" => Self::SysCrash {
                reason: lookup.string("reason")?,
            },
            "sys_monitor_disabled" => Self::SysMonitorDisabled {
                user: lookup.string("user")?,
                service: lookup.string("service")?,
            },
            "user_created" => Self::UserCreated {
                admin: lookup.string("admin")?,
                user: lookup.string("user")?,
                permissions: lookup.list("permissions")?,
            },
            "user_updated" => Self::UserUpdated {
                admin: lookup.string("admin")?,
                user: lookup.string("user")?,
                permissions: lookup.list("permissions")?,
            },
            other => return Err(EventError::UnknownCategory(other.to_string())),
        };

        Ok(event)
    }
}

struct ArgLookup<'a> {
    category: &'a str,
    args: &'a HashMap<String, String>,
}

impl ArgLookup<'_> {
    fn string(&self, name: &'static str) -> Result<String, EventError> {
        self.args
            .get(name)
            .cloned()
            .ok_or_else(|| EventError::MissingArgument {
                category: self.category.to_string(),
                argument: name,
            })
    }

    fn count(&self, name: &'static str) -> Result<u32, EventError> {
        let raw = self.string(name)?;
        raw.trim()
            .parse::<u32>()
            .map_err(|_| EventError::InvalidArgument {
                category: self.category.to_string(),
                argument: name,
                value: raw,
            })
    }

    fn list(&self, name: &'static str) -> Result<Vec<String>, EventError> {
        let raw = self.string(name)?;
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect())
    }
}
