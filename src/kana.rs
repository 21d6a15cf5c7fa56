//! Kana alphabet data shared by the grid engine and the browser surface.
//!
//! Three parallel 70-entry tables: the 45 base kana rows plus the voiced
//! (dakuten) and semi-voiced (handakuten) rows. The entries at a given index
//! always denote the same syllable across all three tables; gameplay treats
//! the index as the identity and the tables as its written forms.

/// Number of entries in each of the parallel kana tables.
pub const KANA_COUNT: usize = 70;

pub const HIRAGANA: [&str; KANA_COUNT] = [
    "あ", "い", "う", "え", "お",
    "か", "き", "く", "け", "こ",
    "さ", "し", "す", "せ", "そ",
    "た", "ち", "つ", "て", "と",
    "な", "に", "ぬ", "ね", "の",
    "は", "ひ", "ふ", "へ", "ほ",
    "ま", "み", "む", "め", "も",
    "や", "ゆ", "よ", "わ", "ん",
    "ら", "り", "る", "れ", "ろ",
    "が", "ぎ", "ぐ", "げ", "ご",
    "ざ", "じ", "ず", "ぜ", "ぞ",
    "だ", "ぢ", "づ", "で", "ど",
    "ば", "び", "ぶ", "べ", "ぼ",
    "ぱ", "ぴ", "ぷ", "ぺ", "ぽ",
];

pub const KATAKANA: [&str; KANA_COUNT] = [
    "ア", "イ", "ウ", "エ", "オ",
    "カ", "キ", "ク", "ケ", "コ",
    "サ", "シ", "ス", "セ", "ソ",
    "タ", "チ", "ツ", "テ", "ト",
    "ナ", "ニ", "ヌ", "ネ", "ノ",
    "ハ", "ヒ", "フ", "ヘ", "ホ",
    "マ", "ミ", "ム", "メ", "モ",
    "ヤ", "ユ", "ヨ", "ワ", "ン",
    "ラ", "リ", "ル", "レ", "ロ",
    "ガ", "ギ", "グ", "ゲ", "ゴ",
    "ザ", "ジ", "ズ", "ゼ", "ゾ",
    "ダ", "ヂ", "ヅ", "デ", "ド",
    "バ", "ビ", "ブ", "ベ", "ボ",
    "パ", "ピ", "プ", "ペ", "ポ",
];

pub const ROMAJI: [&str; KANA_COUNT] = [
    "a", "i", "u", "e", "o",
    "ka", "ki", "ku", "ke", "ko",
    "sa", "shi", "su", "se", "so",
    "ta", "chi", "tsu", "te", "to",
    "na", "ni", "nu", "ne", "no",
    "ha", "hi", "fu", "he", "ho",
    "ma", "mi", "mu", "me", "mo",
    "ya", "yu", "yo", "wa", "n",
    "ra", "ri", "ru", "re", "ro",
    "ga", "gi", "gu", "ge", "go",
    "za", "ji", "zu", "ze", "zo",
    "da", "di", "du", "de", "do",
    "ba", "bi", "bu", "be", "bo",
    "pa", "pi", "pu", "pe", "po",
];

/// Which written form of a kana is shown on a bubble or as the clue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    Hiragana,
    Katakana,
    Romaji,
}

impl DisplayMode {
    /// Map a raw mode integer from the embedding page (0 / 1 / 2). Anything
    /// else is unrecognized and yields `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(DisplayMode::Hiragana),
            1 => Some(DisplayMode::Katakana),
            2 => Some(DisplayMode::Romaji),
            _ => None,
        }
    }

    /// Written form of the kana at `index` in this mode.
    pub fn glyph(self, index: usize) -> &'static str {
        match self {
            DisplayMode::Hiragana => HIRAGANA[index],
            DisplayMode::Katakana => KATAKANA[index],
            DisplayMode::Romaji => ROMAJI[index],
        }
    }
}

/// Reverse lookup of a written kana to its alphabet index. Only the two kana
/// scripts are searchable; romaji clues are never typed back in.
pub fn lookup(glyph: &str, mode: DisplayMode) -> Option<usize> {
    let table = match mode {
        DisplayMode::Hiragana => &HIRAGANA,
        DisplayMode::Katakana => &KATAKANA,
        DisplayMode::Romaji => return None,
    };
    table.iter().position(|entry| *entry == glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_maps_the_three_modes() {
        assert_eq!(DisplayMode::from_raw(0), Some(DisplayMode::Hiragana));
        assert_eq!(DisplayMode::from_raw(1), Some(DisplayMode::Katakana));
        assert_eq!(DisplayMode::from_raw(2), Some(DisplayMode::Romaji));
        assert_eq!(DisplayMode::from_raw(3), None);
        assert_eq!(DisplayMode::from_raw(u32::MAX), None);
    }

    #[test]
    fn lookup_finds_kana_but_not_romaji() {
        assert_eq!(lookup("あ", DisplayMode::Hiragana), Some(0));
        assert_eq!(lookup("ポ", DisplayMode::Katakana), Some(69));
        assert_eq!(lookup("ka", DisplayMode::Romaji), None);
        assert_eq!(lookup("ア", DisplayMode::Hiragana), None);
    }
}
