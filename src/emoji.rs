//! Application custom emoji, wrapped so call sites don't carry raw IDs.

use poise::serenity_prelude::{EmojiId, ReactionType};
use std::fmt;

/// The application's uploaded custom emoji. Each variant carries the fixed
/// emoji ID from the hosting guild; `Display` renders the `<:name:id>`
/// mention form used inside message content and embed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emoji {
    /// Checkmark
    Yes,
    /// Checkmark without background
    YesClear,
    /// X
    No,
    /// X without background
    NoClear,
    /// Dark X without background
    NoClearDark,
    /// Slash
    Maybe,
    /// Slash without background
    MaybeClear,
    /// Warning sign
    Warning,
    /// Warning sign without background
    WarningClear,
    /// Long left arrow
    Left,
    /// Long left arrow without background
    LeftClear,
    /// Dark long left arrow without background
    LeftClearDark,
    /// Long right arrow
    Right,
    /// Long right arrow without background
    RightClear,
    /// Dark long right arrow without background
    RightClearDark,
    /// Long up arrow
    Up,
    /// Long up arrow without background
    UpClear,
    /// Dark long up arrow without background
    UpClearDark,
    /// Long down arrow
    Down,
    /// Long down arrow without background
    DownClear,
    /// Dark long down arrow without background
    DownClearDark,
    /// Trash can
    Trash,
    /// Trash can without background
    TrashClear,
    /// Speech bubble
    Chat,
    /// Speech bubble without background
    ChatClear,
}

impl Emoji {
    /// The emoji's snowflake ID.
    #[must_use]
    pub const fn id(self) -> u64 {
        match self {
            Self::Yes => 1_095_912_430_443_450_469,
            Self::YesClear => 1_095_912_345_978_552_340,
            Self::No => 1_095_912_334_792_331_326,
            Self::NoClear => 1_095_912_336_163_864_576,
            Self::NoClearDark => 1_095_912_337_162_129_418,
            Self::Maybe => 1_095_912_332_351_242_312,
            Self::MaybeClear => 1_095_912_333_768_933_476,
            Self::Warning => 1_096_159_841_120_165_908,
            Self::WarningClear => 1_096_159_842_315_534_409,
            Self::Left => 1_095_912_329_767_571_506,
            Self::LeftClear => 1_095_912_331_210_399_834,
            Self::LeftClearDark => 1_097_032_738_839_732_364,
            Self::Right => 1_095_912_338_248_454_196,
            Self::RightClear => 1_095_912_340_416_893_039,
            Self::RightClearDark => 1_097_032_739_447_918_644,
            Self::Up => 1_096_932_211_938_304_160,
            Self::UpClear => 1_096_932_212_814_917_772,
            Self::UpClearDark => 1_097_032_042_585_280_614,
            Self::Down => 1_096_932_209_237_164_164,
            Self::DownClear => 1_096_932_210_650_656_878,
            Self::DownClearDark => 1_097_032_737_187_184_751,
            Self::Trash => 1_095_912_427_125_747_883,
            Self::TrashClear => 1_095_912_428_597_948_507,
            Self::Chat => 1_096_272_195_841_441_822,
            Self::ChatClear => 1_096_272_196_864_835_584,
        }
    }

    /// The emoji's upload name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::YesClear => "yes_clear",
            Self::No => "no",
            Self::NoClear => "no_clear",
            Self::NoClearDark => "no_clear_dark",
            Self::Maybe => "maybe",
            Self::MaybeClear => "maybe_clear",
            Self::Warning => "warning",
            Self::WarningClear => "warning_clear",
            Self::Left => "left",
            Self::LeftClear => "left_clear",
            Self::LeftClearDark => "left_clear_dark",
            Self::Right => "right",
            Self::RightClear => "right_clear",
            Self::RightClearDark => "right_clear_dark",
            Self::Up => "up",
            Self::UpClear => "up_clear",
            Self::UpClearDark => "up_clear_dark",
            Self::Down => "down",
            Self::DownClear => "down_clear",
            Self::DownClearDark => "down_clear_dark",
            Self::Trash => "trash",
            Self::TrashClear => "trash_clear",
            Self::Chat => "chat",
            Self::ChatClear => "chat_clear",
        }
    }

    /// Converts to a [`ReactionType`] for reacting to messages or building
    /// buttons.
    #[must_use]
    pub fn reaction(self) -> ReactionType {
        ReactionType::Custom {
            animated: false,
            id: EmojiId::new(self.id()),
            name: Some(self.name().to_string()),
        }
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<:{}:{}>", self.name(), self.id())
    }
}
