//! Stable avatar colours for chat participants.

/// Avatar colours, indexed by [`palette_index`].
pub const AVATAR_PALETTE: [AvatarColour; 8] = [
    AvatarColour::Blue,
    AvatarColour::Green,
    AvatarColour::Purple,
    AvatarColour::Orange,
    AvatarColour::Pink,
    AvatarColour::Indigo,
    AvatarColour::Teal,
    AvatarColour::Red,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AvatarColour {
    #[display("blue")]
    Blue,
    #[display("green")]
    Green,
    #[display("purple")]
    Purple,
    #[display("orange")]
    Orange,
    #[display("pink")]
    Pink,
    #[display("indigo")]
    Indigo,
    #[display("teal")]
    Teal,
    #[display("red")]
    Red,
}

impl AvatarColour {
    /// ANSI escape for terminal output
    pub fn ansi(&self) -> &'static str {
        match self {
            AvatarColour::Blue => "\x1b[34m",
            AvatarColour::Green => "\x1b[32m",
            AvatarColour::Purple => "\x1b[35m",
            AvatarColour::Orange => "\x1b[33m",
            AvatarColour::Pink => "\x1b[95m",
            AvatarColour::Indigo => "\x1b[94m",
            AvatarColour::Teal => "\x1b[36m",
            AvatarColour::Red => "\x1b[31m",
        }
    }
}

pub const ANSI_RESET: &str = "\x1b[0m";

/// `h = c + (h << 5) - h` over UTF-16 code units.
///
/// The shift works on the 32-bit truncation of `h` while the sum keeps full
/// width.
fn uid_hash(uid: &str) -> i64 {
    uid.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        i64::from(unit) + shifted - hash
    })
}

pub fn palette_index(uid: &str) -> usize {
    (uid_hash(uid).unsigned_abs() % AVATAR_PALETTE.len() as u64) as usize
}

pub fn avatar_colour(uid: &str) -> AvatarColour {
    AVATAR_PALETTE[palette_index(uid)]
}

/// First two characters, upper-cased, for the avatar badge.
pub fn initials(uid: &str) -> String {
    uid.chars().take(2).collect::<String>().to_uppercase()
}
