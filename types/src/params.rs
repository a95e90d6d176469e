//! Engine parameters.
//!
//! These are deployment constants rather than per-action inputs; a host
//! loads them once (the daemon reads them from the `[params]` table of its
//! TOML config) and hands them to the engine.

use serde::{Deserialize, Serialize};

/// How a second `unstake` treats the maturity of an already pending refund.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundWindow {
    /// The whole accumulated refund matures `refund_delay_secs` after the
    /// latest unstake.
    #[default]
    Reset,
    /// The accumulated refund keeps the maturity of the first pending
    /// unstake; later unstakes ride along.
    Preserve,
}

/// Parameters of the token state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenParams {
    /// Decimal places every currency must use.
    pub precision: u8,

    /// Delay between `unstake` and the moment `refund` may be claimed.
    /// Default: 7 days = 604800 seconds.
    pub refund_delay_secs: u64,

    /// Maximum memo length in bytes for issue, transfer and rewarddrop.
    pub max_memo_bytes: usize,

    /// Maturity policy for repeated unstakes.
    pub refund_window: RefundWindow,
}

impl TokenParams {
    pub const DEFAULT_REFUND_DELAY_SECS: u64 = 7 * 24 * 3600;
}

impl Default for TokenParams {
    fn default() -> Self {
        Self {
            precision: 4,
            refund_delay_secs: Self::DEFAULT_REFUND_DELAY_SECS,
            max_memo_bytes: 256,
            refund_window: RefundWindow::Reset,
        }
    }
}
