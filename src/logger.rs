//! The OWASP event dispatcher.
//!
//! [`OwaspLogger`] wraps a [`LogBackend`] and adds one method per recognized
//! security event. Plain messages pass straight through to the backend.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use owasp_logger::{OwaspLogger, RecordingBackend, Severity};
//!
//! let backend = Arc::new(RecordingBackend::new());
//! let logger = OwaspLogger::new("example.appid", backend.clone());
//!
//! logger.info("Did I just get coconut-malled?");
//! logger.authz_admin("banana-bob", "coconut-charlie").unwrap();
//!
//! let calls = backend.calls();
//! assert_eq!(calls.len(), 2);
//! assert_eq!(calls[1].level, Severity::Warning);
//! ```

use std::fmt;
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::backend::{LogBackend, TracingBackend};
use crate::config::EnvConfig;
use crate::event::{EventError, OwaspEvent, SecurityEvent, Severity};

/// Security event dispatcher over a shared logging backend.
#[derive(Clone)]
pub struct OwaspLogger {
    appid: String,
    backend: Arc<dyn LogBackend>,
}

impl OwaspLogger {
    /// Create a dispatcher writing into `backend`.
    pub fn new(appid: impl Into<String>, backend: Arc<dyn LogBackend>) -> Self {
        Self {
            appid: appid.into(),
            backend,
        }
    }

    /// Create a dispatcher with the default backend: message-only lines on
    /// stderr at INFO and above.
    pub fn with_default_backend(appid: impl Into<String>) -> Self {
        Self::with_console_writer(appid, std::io::stderr)
    }

    /// Default backend policy with output sent to `writer` instead of stderr.
    pub fn with_console_writer<W>(appid: impl Into<String>, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::new(
            appid,
            Arc::new(TracingBackend::console_with_writer(tracing::Level::INFO, writer)),
        )
    }

    /// Create a dispatcher writing through the ambient `tracing` subscriber,
    /// named and identified from the environment configuration.
    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(
            config.appid.clone(),
            Arc::new(TracingBackend::new(config.logger_name.clone())),
        )
    }

    pub fn appid(&self) -> &str {
        &self.appid
    }

    pub fn backend(&self) -> &Arc<dyn LogBackend> {
        &self.backend
    }

    /// Build the OWASP record for `event` without emitting it.
    pub fn event_for(&self, event: &SecurityEvent) -> OwaspEvent {
        OwaspEvent::new(
            self.appid.as_str(),
            event.event_id(),
            event.severity(),
            event.description(),
        )
    }

    /// Emit `event` as exactly one backend call.
    ///
    /// Both serialized forms are produced before the backend is called, so a
    /// serialization failure leaves the backend untouched.
    pub fn emit(&self, event: &SecurityEvent) -> Result<(), EventError> {
        let record = self.event_for(event);
        let message = record.to_json()?;
        let extra = record.to_map()?;
        self.backend.log(record.level(), &message, Some(&extra));
        Ok(())
    }

    // Pass-through to the backend for non-OWASP messages.

    pub fn log(&self, level: Severity, message: &str) {
        self.backend.log(level, message, None);
    }

    pub fn debug(&self, message: &str) {
        self.backend.debug(message);
    }

    pub fn info(&self, message: &str) {
        self.backend.info(message);
    }

    pub fn warning(&self, message: &str) {
        self.backend.warning(message);
    }

    pub fn error(&self, message: &str) {
        self.backend.error(message);
    }

    pub fn critical(&self, message: &str) {
        self.backend.critical(message);
    }

    // Authentication

    /// Successful login after `failures` failed attempts.
    pub fn authn_login_successafterfail(
        &self,
        user: &str,
        failures: u32,
    ) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnLoginSuccessAfterFail {
            user: user.to_string(),
            failures,
        })
    }

    /// Failed login.
    pub fn authn_login_fail(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnLoginFail {
            user: user.to_string(),
        })
    }

    /// Failed login limit reached.
    pub fn authn_login_fail_max(&self, user: &str, fail_limit: u32) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnLoginFailMax {
            user: user.to_string(),
            fail_limit,
        })
    }

    /// Account lockout after too many failed logins.
    pub fn authn_login_lock(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnLoginLock {
            user: user.to_string(),
        })
    }

    pub fn authn_password_change(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnPasswordChange {
            user: user.to_string(),
        })
    }

    pub fn authn_password_change_fail(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnPasswordChangeFail {
            user: user.to_string(),
        })
    }

    pub fn authn_token_created<S: AsRef<str>>(
        &self,
        user: &str,
        permissions: &[S],
    ) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnTokenCreated {
            user: user.to_string(),
            permissions: to_owned_list(permissions),
        })
    }

    pub fn authn_token_revoked(&self, user: &str, token_id: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnTokenRevoked {
            user: user.to_string(),
            token_id: token_id.to_string(),
        })
    }

    pub fn authn_token_delete(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthnTokenDelete {
            user: user.to_string(),
        })
    }

    // Authorization

    /// Access attempt on a resource without entitlement.
    pub fn authz_fail(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthzFail {
            user: user.to_string(),
        })
    }

    /// `admin` promoted `user` from user to admin.
    pub fn authz_admin(&self, admin: &str, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::AuthzAdmin {
            admin: admin.to_string(),
            user: user.to_string(),
        })
    }

    // System

    pub fn sys_startup(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::SysStartup {
            user: user.to_string(),
        })
    }

    pub fn sys_shutdown(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::SysShutdown {
            user: user.to_string(),
        })
    }

    pub fn sys_restart(&self, user: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::SysRestart {
            user: user.to_string(),
        })
    }

    pub fn sys_crash(&self, reason: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::SysCrash {
            reason: reason.to_string(),
        })
    }

    pub fn sys_monitor_disabled(&self, user: &str, service: &str) -> Result<(), EventError> {
        self.emit(&SecurityEvent::SysMonitorDisabled {
            user: user.to_string(),
            service: service.to_string(),
        })
    }

    // User management

    /// `admin` created `user` with the given privilege attributes.
    pub fn user_created<S: AsRef<str>>(
        &self,
        admin: &str,
        user: &str,
        permissions: &[S],
    ) -> Result<(), EventError> {
        self.emit(&SecurityEvent::UserCreated {
            admin: admin.to_string(),
            user: user.to_string(),
            permissions: to_owned_list(permissions),
        })
    }

    /// `admin` updated the privilege attributes of `user`.
    pub fn user_updated<S: AsRef<str>>(
        &self,
        admin: &str,
        user: &str,
        permissions: &[S],
    ) -> Result<(), EventError> {
        self.emit(&SecurityEvent::UserUpdated {
            admin: admin.to_string(),
            user: user.to_string(),
            permissions: to_owned_list(permissions),
        })
    }
}

impl fmt::Debug for OwaspLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwaspLogger")
            .field("appid", &self.appid)
            .finish_non_exhaustive()
    }
}

fn to_owned_list<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|s| s.as_ref().to_string()).collect()
}
