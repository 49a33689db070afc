//! Menorah Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, Zustandsautomaten und Pure Functions,
//! die auf dem Host getestet werden.

#![no_std]

pub mod button;
pub mod flash_store;
pub mod flicker;
pub mod input;
pub mod persistence;
pub mod shared;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use button::{ButtonState, ButtonTiming, Detection, PressDetector};
pub use flash_store::{FlashDayStore, LAYOUT_VERSION, MountReport};
pub use flicker::{FlickerConfig, FlickerEngine, apply_frame};
pub use input::{InputController, InputStep, PressReport};
pub use persistence::{LoadOutcome, load_day, save_day};
pub use shared::{DayReader, DayWriter, SharedDay};
pub use traits::{ButtonInput, CounterStore, DimmableOutputs, OutputError, StoreError};
pub use types::{
    CANDLE_COUNT, CHANNEL_COUNT, CHANNEL_LAYOUT, ChannelId, ChannelSpec, DayCounter, Frame,
    TimingGroup,
};
