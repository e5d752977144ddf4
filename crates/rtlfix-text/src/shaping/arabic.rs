//! Arabic Script Reshaping
//!
//! Joining analysis and presentation-form substitution, so that Arabic text
//! renders connected in environments that draw code points one by one
//! without OpenType shaping.

/// Arabic joining type (from Unicode ArabicShaping.txt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoiningType {
    /// Right joining (connects to the preceding letter only)
    Right,
    /// Dual joining (connects on both sides)
    Dual,
    /// Join causing (tatweel, ZWJ): joins but has no forms of its own
    Causing,
    /// Non-joining
    #[default]
    NonJoining,
    /// Transparent (harakat and other marks, skipped by joining analysis)
    Transparent,
}

impl JoiningType {
    /// Whether a character of this type connects to the character after it
    pub fn joins_forward(self) -> bool {
        matches!(self, JoiningType::Dual | JoiningType::Causing)
    }

    /// Whether a character of this type accepts a connection from the one before it
    pub fn joins_backward(self) -> bool {
        matches!(self, JoiningType::Right | JoiningType::Dual | JoiningType::Causing)
    }
}

/// Arabic positional form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionalForm {
    /// Isolated form (no connections)
    Isolated,
    /// Initial form (connects to next only)
    Initial,
    /// Medial form (connects both sides)
    Medial,
    /// Final form (connects to previous only)
    Final,
}

const LAM: char = '\u{0644}';

/// Whether `c` is a haraka (Arabic diacritic mark)
pub fn is_harakah(c: char) -> bool {
    matches!(c as u32,
        0x0610..=0x061A | // Honorific signs and small high marks
        0x064B..=0x065F | // Tanween, short vowels, shadda, sukun
        0x0670 |          // Superscript alef
        0x06D6..=0x06DC | // Small high ligatures
        0x06DF..=0x06E4 |
        0x06E7..=0x06E8 |
        0x06EA..=0x06ED |
        0x08D3..=0x08E1 |
        0x08E3..=0x08FF
    )
}

/// Get joining type for a character
pub fn joining_type(c: char) -> JoiningType {
    if is_harakah(c) {
        return JoiningType::Transparent;
    }

    match c as u32 {
        0x0622..=0x0625 | // Alef with madda / hamza, waw with hamza
        0x0627 |          // Alef
        0x0629 |          // Teh marbuta
        0x062F..=0x0632 | // Dal, thal, reh, zain
        0x0648 |          // Waw
        0x0671..=0x0673 |
        0x0675..=0x0677 |
        0x0688..=0x0699 |
        0x06C0 |
        0x06C3..=0x06CB |
        0x06CD |
        0x06CF |
        0x06D2..=0x06D3 |
        0x06D5 |
        0x06EE..=0x06EF => JoiningType::Right,

        0x0626 |          // Yeh with hamza
        0x0628 |          // Beh
        0x062A..=0x062E | // Teh through khah
        0x0633..=0x063F | // Seen through ghain and keheh variants
        0x0641..=0x0647 | // Feh through heh
        0x0649..=0x064A | // Alef maksura, yeh
        0x066E..=0x066F |
        0x0678..=0x0687 |
        0x069A..=0x06BF |
        0x06C1..=0x06C2 |
        0x06CC |
        0x06CE |
        0x06D0..=0x06D1 |
        0x06FA..=0x06FC |
        0x06FF |
        0x0750..=0x077F |
        0x08A0..=0x08B4 |
        0x08B6..=0x08C7 => JoiningType::Dual,

        0x0640 | // Tatweel
        0x200D => JoiningType::Causing, // ZWJ

        _ => JoiningType::NonJoining,
    }
}

/// Resolve the positional form of every character from its joining types.
///
/// Non-letters resolve to `Isolated`; callers only look the form up for
/// characters that have presentation forms.
pub fn resolve_forms(types: &[JoiningType]) -> Vec<PositionalForm> {
    (0..types.len())
        .map(|i| match types[i] {
            JoiningType::Right => {
                if joins_previous(types, i) {
                    PositionalForm::Final
                } else {
                    PositionalForm::Isolated
                }
            }
            JoiningType::Dual => match (joins_previous(types, i), joins_next(types, i)) {
                (true, true) => PositionalForm::Medial,
                (true, false) => PositionalForm::Final,
                (false, true) => PositionalForm::Initial,
                (false, false) => PositionalForm::Isolated,
            },
            _ => PositionalForm::Isolated,
        })
        .collect()
}

/// Check if position connects to the previous character
fn joins_previous(types: &[JoiningType], pos: usize) -> bool {
    types[..pos]
        .iter()
        .rev()
        .find(|jt| **jt != JoiningType::Transparent)
        .is_some_and(|jt| jt.joins_forward())
}

/// Check if position connects to the next character
fn joins_next(types: &[JoiningType], pos: usize) -> bool {
    types[pos].joins_forward()
        && types[pos + 1..]
            .iter()
            .find(|jt| **jt != JoiningType::Transparent)
            .is_some_and(|jt| jt.joins_backward())
}

/// Presentation form of `c` in the given position, if it has one.
///
/// Forms-B covers the base alphabet (U+0621..U+064A); the Persian letters
/// and alef maksura's connecting forms live in Forms-A.
pub fn presentation_form(c: char, form: PositionalForm) -> Option<char> {
    let code = c as u32;

    match (code, form) {
        (0x0649, PositionalForm::Initial) => return char::from_u32(0xFBE8),
        (0x0649, PositionalForm::Medial) => return char::from_u32(0xFBE9),
        _ => {}
    }

    let (base, has_four_forms) = match code {
        0x0621 => (0xFE80, false), // Hamza
        0x0622 => (0xFE81, false), // Alef with madda
        0x0623 => (0xFE83, false), // Alef with hamza above
        0x0624 => (0xFE85, false), // Waw with hamza
        0x0625 => (0xFE87, false), // Alef with hamza below
        0x0626 => (0xFE89, true),  // Yeh with hamza
        0x0627 => (0xFE8D, false), // Alef
        0x0628 => (0xFE8F, true),  // Beh
        0x0629 => (0xFE93, false), // Teh marbuta
        0x062A => (0xFE95, true),  // Teh
        0x062B => (0xFE99, true),  // Theh
        0x062C => (0xFE9D, true),  // Jeem
        0x062D => (0xFEA1, true),  // Hah
        0x062E => (0xFEA5, true),  // Khah
        0x062F => (0xFEA9, false), // Dal
        0x0630 => (0xFEAB, false), // Thal
        0x0631 => (0xFEAD, false), // Reh
        0x0632 => (0xFEAF, false), // Zain
        0x0633 => (0xFEB1, true),  // Seen
        0x0634 => (0xFEB5, true),  // Sheen
        0x0635 => (0xFEB9, true),  // Sad
        0x0636 => (0xFEBD, true),  // Dad
        0x0637 => (0xFEC1, true),  // Tah
        0x0638 => (0xFEC5, true),  // Zah
        0x0639 => (0xFEC9, true),  // Ain
        0x063A => (0xFECD, true),  // Ghain
        0x0641 => (0xFED1, true),  // Feh
        0x0642 => (0xFED5, true),  // Qaf
        0x0643 => (0xFED9, true),  // Kaf
        0x0644 => (0xFEDD, true),  // Lam
        0x0645 => (0xFEE1, true),  // Meem
        0x0646 => (0xFEE5, true),  // Noon
        0x0647 => (0xFEE9, true),  // Heh
        0x0648 => (0xFEED, false), // Waw
        0x0649 => (0xFEEF, false), // Alef maksura
        0x064A => (0xFEF1, true),  // Yeh
        0x067E => (0xFB56, true),  // Peh
        0x0686 => (0xFB7A, true),  // Tcheh
        0x0698 => (0xFB8A, false), // Jeh
        0x06A9 => (0xFB8E, true),  // Keheh
        0x06AF => (0xFB92, true),  // Gaf
        0x06CC => (0xFBFC, true),  // Farsi yeh
        _ => return None,
    };

    // Forms are laid out as: isolated, final, initial, medial
    let offset = match (form, has_four_forms) {
        (PositionalForm::Isolated, _) => 0,
        (PositionalForm::Final, _) => 1,
        (PositionalForm::Initial, true) => 2,
        (PositionalForm::Medial, true) => 3,
        (PositionalForm::Initial, false) => 0,
        (PositionalForm::Medial, false) => 1,
    };

    char::from_u32(base + offset)
}

/// Whether `c` is an alef that forms a ligature after lam
pub fn is_alef_variant(c: char) -> bool {
    matches!(c, '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0627}')
}

/// Get Lam-Alef ligature presentation form
pub fn lam_alef_ligature(alef: char, form: PositionalForm) -> Option<char> {
    let base = match alef {
        '\u{0622}' => 0xFEF5, // Lam-Alef with madda
        '\u{0623}' => 0xFEF7, // Lam-Alef with hamza above
        '\u{0625}' => 0xFEF9, // Lam-Alef with hamza below
        '\u{0627}' => 0xFEFB, // Lam-Alef
        _ => return None,
    };

    let offset = match form {
        PositionalForm::Isolated | PositionalForm::Initial => 0,
        PositionalForm::Final | PositionalForm::Medial => 1,
    };

    char::from_u32(base + offset)
}

/// Contextual letter-form substitution for Arabic text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArabicReshaper {
    delete_harakat: bool,
}

impl ArabicReshaper {
    /// Create a reshaper; `delete_harakat` strips diacritics from the output
    pub fn new(delete_harakat: bool) -> Self {
        Self { delete_harakat }
    }

    /// Whether harakat are removed
    pub fn delete_harakat(&self) -> bool {
        self.delete_harakat
    }

    /// Replace every Arabic letter with its contextual presentation form.
    ///
    /// Output stays in logical order; reordering is a separate pass.
    pub fn reshape(&self, text: &str) -> String {
        let chars: Vec<char> = text
            .chars()
            .filter(|&c| !(self.delete_harakat && is_harakah(c)))
            .collect();
        let types: Vec<JoiningType> = chars.iter().map(|&c| joining_type(c)).collect();
        let forms = resolve_forms(&types);

        let mut out = String::with_capacity(text.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == LAM {
                // Marks between lam and alef follow the ligature
                let mut next = i + 1;
                while types.get(next) == Some(&JoiningType::Transparent) {
                    next += 1;
                }
                if let Some(&alef) = chars.get(next).filter(|&&n| is_alef_variant(n)) {
                    let form = if joins_previous(&types, i) {
                        PositionalForm::Final
                    } else {
                        PositionalForm::Isolated
                    };
                    if let Some(ligature) = lam_alef_ligature(alef, form) {
                        out.push(ligature);
                        out.extend(&chars[i + 1..next]);
                        i = next + 1;
                        continue;
                    }
                }
            }

            out.push(presentation_form(c, forms[i]).unwrap_or(c));
            i += 1;
        }

        out
    }
}
