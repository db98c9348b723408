//! What the pipeline needs to know about the host it runs in.
//!
//! The host decides whether debug mode is on and whether the current user may
//! see raw diagnostic payloads. Diagnostic events are emitted through
//! [`Diagnostics`], which stays silent unless debug mode is on, so the
//! pipeline can report freely without checking the flag at every call site.

use crate::util::truncate_bytes;

/// Tracing target for diagnostic events, so they can be filtered separately.
pub const DIAGNOSTICS_TARGET: &str = "newsgrep::diagnostics";

/// Maximum bytes of a remote payload written to the diagnostic log.
pub const LOG_EXCERPT_BYTES: usize = 8192;

/// Maximum bytes of a remote payload shown inline to privileged users.
pub const ADMIN_EXCERPT_BYTES: usize = 16384;

/// Host-wide flags for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostContext {
    /// Verbose diagnostics; also a precondition for inline payload display.
    pub debug: bool,
    /// The current user may see raw diagnostic payloads.
    pub privileged: bool,
}

impl HostContext {
    pub fn new(debug: bool, privileged: bool) -> Self {
        Self { debug, privileged }
    }

    /// Whether raw payloads may be rendered inline.
    pub fn show_raw_payloads(&self) -> bool {
        self.debug && self.privileged
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            enabled: self.debug,
        }
    }
}

/// Conditional diagnostics sink backed by `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn non_success_status(&self, status: u16, url: &str) {
        if self.enabled {
            tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                status = status,
                url = %url,
                "Remote responded with non-200 status"
            );
        }
    }

    pub fn parse_failed(&self, status: u16, content_type: Option<&str>, body: &str) {
        if self.enabled {
            tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                status = status,
                content_type = content_type.unwrap_or(""),
                "Response could not be parsed as XML"
            );
            tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                body = truncate_bytes(body, LOG_EXCERPT_BYTES),
                "Response (truncated)"
            );
        }
    }

    pub fn skipped_item(&self, index: usize, reason: &str, excerpt: &str) {
        if self.enabled {
            tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                index = index,
                reason = %reason,
                item = excerpt,
                "Skipping malformed <item> entry"
            );
        }
    }

    pub fn no_items(&self, body: &str) {
        if self.enabled {
            tracing::warn!(
                target: DIAGNOSTICS_TARGET,
                payload = truncate_bytes(body, LOG_EXCERPT_BYTES),
                "No <item> found"
            );
        }
    }
}
