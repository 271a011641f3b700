//! Fingers, fretboard positions and the annotation marks attached to a fingering.

use crate::{FretNum, StringNum};

use serde::{Deserialize, Serialize};
use std::{fmt, ops};

/// The fingers of the fretting hand.
///
/// The declaration order matches the numeric finger index, so comparing two fingers tells whether
/// a move goes "up" the hand (towards the little finger).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum Finger {
    #[default]
    Unset,
    Open,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const FRETTING: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Little];

    /// Numeric finger index as written in fingering charts (`-1` for an unset finger).
    pub fn numeric_index(&self) -> i32 {
        match self {
            Finger::Unset => -1,
            Finger::Open => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Little => 4,
        }
    }

    /// Inverse of [`Finger::numeric_index`] for the fretting fingers and the open string.
    pub fn from_numeric_index(n: i32) -> Option<Self> {
        match n {
            0 => Some(Finger::Open),
            1 => Some(Finger::Index),
            2 => Some(Finger::Middle),
            3 => Some(Finger::Ring),
            4 => Some(Finger::Little),
            _ => None,
        }
    }

    pub fn is_set(&self) -> bool {
        *self != Finger::Unset
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finger::Unset => write!(f, "-"),
            _ => write!(f, "{}", self.numeric_index()),
        }
    }
}

/// A position on the fretboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FretPos {
    pub string: StringNum,
    pub fret: FretNum,
}

impl FretPos {
    pub fn new(string: StringNum, fret: FretNum) -> Self {
        Self { string, fret }
    }
}

/// A set of annotation marks.
///
/// The first group are hints supplied by the caller to steer the engine, the second group are
/// markers the engine attaches to explain the fingering it chose.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Annotation(u16);

impl Annotation {
    pub const NONE: Annotation = Annotation(0x0000);

    pub const SHIFT_UP: Annotation = Annotation(0x0001);
    pub const SHIFT_DOWN: Annotation = Annotation(0x0002);
    pub const RESTART: Annotation = Annotation(0x0004);
    pub const GLISSANDO: Annotation = Annotation(0x0008);
    pub const BREAK: Annotation = Annotation(0x4000);

    pub const POSITION_SHIFT: Annotation = Annotation(0x0010);
    pub const STRETCH: Annotation = Annotation(0x0020);
    pub const LAYOVER: Annotation = Annotation(0x0040);
    pub const BAD_CHANGE: Annotation = Annotation(0x0080);
    pub const BAD_STRETCH: Annotation = Annotation(0x0100);
    pub const Q_SHIFT: Annotation = Annotation(0x0200);
    pub const T_MOVE: Annotation = Annotation(0x0400);
    pub const O_MOVE: Annotation = Annotation(0x0800);
    pub const A_MOVE: Annotation = Annotation(0x1000);
    pub const AUTO_HINT: Annotation = Annotation(0x2000);

    /// Hints that end a chunk.
    pub const BREAK_HINTS: Annotation =
        Annotation(Self::SHIFT_UP.0 | Self::SHIFT_DOWN.0 | Self::RESTART.0 | Self::BREAK.0);

    /// Text symbols, in rendering order.
    const SYMBOLS: [(Annotation, char); 15] = [
        (Annotation::RESTART, '='),
        (Annotation::SHIFT_UP, '+'),
        (Annotation::SHIFT_DOWN, '-'),
        (Annotation::GLISSANDO, '/'),
        (Annotation::BREAK, '*'),
        (Annotation::AUTO_HINT, 'c'),
        (Annotation::STRETCH, 's'),
        (Annotation::POSITION_SHIFT, '*'),
        (Annotation::LAYOVER, 'L'),
        (Annotation::BAD_CHANGE, '!'),
        (Annotation::BAD_STRETCH, 'X'),
        (Annotation::Q_SHIFT, 'Q'),
        (Annotation::T_MOVE, 'T'),
        (Annotation::O_MOVE, 'O'),
        (Annotation::A_MOVE, 'A'),
    ];

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if any of the marks in `other` is set.
    pub fn intersects(&self, other: Annotation) -> bool {
        self.0 & other.0 != 0
    }

    /// True if all of the marks in `other` are set.
    pub fn contains(&self, other: Annotation) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Annotation) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Annotation) {
        self.0 &= !other.0;
    }

    pub fn has_break_hint(&self) -> bool {
        self.intersects(Self::BREAK_HINTS)
    }

    pub fn has_shift_hint(&self) -> bool {
        self.intersects(Self::SHIFT_UP | Self::SHIFT_DOWN)
    }

    /// Parse a string of annotation symbols. `*` is read as the caller's break hint.
    ///
    /// Returns `None` if the string contains an unknown symbol.
    pub fn from_symbols(s: &str) -> Option<Self> {
        let mut annotation = Annotation::NONE;
        for c in s.chars() {
            let (mark, _) = Self::SYMBOLS.iter().find(|(_, symbol)| *symbol == c)?;
            annotation.insert(*mark);
        }

        Some(annotation)
    }
}

impl ops::BitOr for Annotation {
    type Output = Annotation;

    fn bitor(self, rhs: Annotation) -> Annotation {
        Annotation(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Annotation {
    fn bitor_assign(&mut self, rhs: Annotation) {
        self.insert(rhs);
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mark, symbol) in Self::SYMBOLS.iter() {
            if self.contains(*mark) {
                write!(f, "{}", symbol)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Annotation({:#06x} \"{}\")", self.0, self)
    }
}

/// A fretboard position extended by the finger used and any annotation marks.
///
/// String and fret are `None` until the fingering has been fixed (or for a rest).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Fingering {
    pub string: Option<StringNum>,
    pub fret: Option<FretNum>,
    pub finger: Finger,
    pub annotation: Annotation,
}

impl Fingering {
    pub fn new(pos: FretPos, finger: Finger) -> Self {
        Self {
            string: Some(pos.string),
            fret: Some(pos.fret),
            finger,
            annotation: Annotation::NONE,
        }
    }

    /// The fretboard position, if both string and fret are fixed.
    pub fn fret_pos(&self) -> Option<FretPos> {
        match (self.string, self.fret) {
            (Some(string), Some(fret)) => Some(FretPos { string, fret }),
            _ => None,
        }
    }

    pub fn has_annotation(&self, mark: Annotation) -> bool {
        self.annotation.intersects(mark)
    }

    pub fn add_annotation(&mut self, mark: Annotation) {
        self.annotation.insert(mark);
    }
}
