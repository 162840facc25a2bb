/// Which pool the server is currently dealing from. Jokes at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Joke,
    Proverb,
}

impl Mode {
    /// Single-letter code carried on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Mode::Joke => "J",
            Mode::Proverb => "P",
        }
    }

    pub fn from_code(code: &str) -> Option<Mode> {
        if code.eq_ignore_ascii_case("J") {
            Some(Mode::Joke)
        } else if code.eq_ignore_ascii_case("P") {
            Some(Mode::Proverb)
        } else {
            None
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            Mode::Joke => "joke",
            Mode::Proverb => "proverb",
        }
    }

    /// Display form used in admin status lines.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Joke => "Joke Mode",
            Mode::Proverb => "Proverb Mode",
        }
    }
}

pub const POOL_SIZE: usize = 10;

static JOKES: [&str; POOL_SIZE] = [
    "What's orange and sounds like a parrot? A carrot.",
    "What do you call it when Batman skips church? Christian Bale.",
    "Two fish are sitting in a tank. One looks over at the other and says: \"Hey, do you know how to drive this thing?\"",
    "I told my doctor that I broke my arm in two places. He told me to stop going to those places.",
    "I told my girlfriend she drew her eyebrows too high. She seemed surprised.",
    "Two cows are sitting in a field, and one says to the other, \"so, how about that mad cow disease? Scary stuff, right?\" To which to other replies, \"terrifying. But what do I care? I’m a helicopter.\"",
    "What did the 0 say to the 8? Nice belt!",
    "Why is six afraid of seven? Because seven ate nine.",
    "Two muffins are in an oven. One muffin says \"gosh, it’s hot in here\". The other muffin screams \"AAAH!! A talking muffin!\"",
    "What do you call bears with no ears? B",
];

static PROVERBS: [&str; POOL_SIZE] = [
    "The early bird catches the worm.",
    "Actions speak louder than words.",
    "When in Rome, do as the Romans.",
    "The squeaky wheel gets the grease.",
    "When the going gets tough, the tough get going.",
    "Fortune favors the bold.",
    "Hope for the best, but prepare for the worst.",
    "Birds of a feather flock together.",
    "Better late than never.",
    "There's no such thing as a free lunch.",
];

/// Look up one item. Indices come from a `Rotation` and are always in range.
pub fn text(mode: Mode, index: u8) -> &'static str {
    all(mode)[index as usize]
}

pub fn all(mode: Mode) -> &'static [&'static str; POOL_SIZE] {
    match mode {
        Mode::Joke => &JOKES,
        Mode::Proverb => &PROVERBS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_hold_ten_distinct_items() {
        for mode in [Mode::Joke, Mode::Proverb] {
            let items = all(mode);
            for (i, a) in items.iter().enumerate() {
                for b in &items[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn mode_codes_round_trip() {
        assert_eq!(Mode::from_code("J"), Some(Mode::Joke));
        assert_eq!(Mode::from_code("p"), Some(Mode::Proverb));
        assert_eq!(Mode::from_code("x"), None);
        assert_eq!(Mode::from_code(Mode::Proverb.code()), Some(Mode::Proverb));
    }
}
