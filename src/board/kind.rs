/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

/// The color of a player and of every piece they own.
///
/// White is the default, as it is the color that sits on ranks 1 and 2 in every scenario.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// Both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Creates a [`Color`] from the case of a FEN piece char.
    ///
    /// # Example
    /// ```
    /// # use tempo::Color;
    /// assert_eq!(Color::from_case('Q'), Color::White);
    /// assert_eq!(Color::from_case('q'), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_uppercase() {
            Self::White
        } else {
            Self::Black
        }
    }

    /// Parses the active-color field of a FEN string.
    ///
    /// # Example
    /// ```
    /// # use tempo::Color;
    /// assert_eq!(Color::from_uci('b').unwrap(), Color::Black);
    /// assert!(Color::from_uci('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(c: char) -> Result<Self> {
        match c {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Invalid char for Color: Must be 'w' or 'b'. Got {c:?}"),
        }
    }

    /// The active-color char used in FEN strings.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// `1` for White, `-1` for Black.
    ///
    /// Multiplying a rank delta by this turns "forward" into a board direction.
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// The other color.
    ///
    /// # Example
    /// ```
    /// # use tempo::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable, lowercase name of this color.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Invalid str for Color: Expected one of w, b, white, black. Got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

/// The kind (or "role") of a piece, without a [`Color`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// All kinds, in the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// The kinds a pawn may promote to, strongest first.
    #[inline(always)]
    pub const fn promotions() -> [Self; 4] {
        use PieceKind::*;
        [Queen, Rook, Bishop, Knight]
    }

    /// Material value of this kind, in pawns.
    ///
    /// The king is worth `0` so that totals only count tradeable material.
    ///
    /// # Example
    /// ```
    /// # use tempo::PieceKind;
    /// assert_eq!(PieceKind::Queen.value(), 9);
    /// assert_eq!(PieceKind::King.value(), 0);
    /// ```
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 3,
            Self::Bishop => 3,
            Self::Rook => 5,
            Self::Queen => 9,
            Self::King => 0,
        }
    }

    /// Parses a FEN piece letter, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use tempo::PieceKind;
    /// assert_eq!(PieceKind::from_uci('N').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Lowercase FEN letter of this kind.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// FEN letter of this kind, uppercase for White.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, PieceKind};
    /// assert_eq!(PieceKind::Rook.to_fen_char(Color::White), 'R');
    /// assert_eq!(PieceKind::Rook.to_fen_char(Color::Black), 'r');
    /// ```
    #[inline(always)]
    pub const fn to_fen_char(&self, color: Color) -> char {
        let c = self.to_uci();
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Human-readable, lowercase name of this kind.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    /// Accepts either a single FEN letter or the kind's full name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 1 {
            return Self::from_uci(s.as_bytes()[0] as char);
        }

        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Invalid str for PieceKind: Got {s:?}"))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The faction a player has chosen.
///
/// Races only differ in how much punishment their pieces take before dying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Race {
    #[default]
    Classic,
    Protoss,
    Terran,
    Zerg,
}

impl Race {
    /// All races, in menu order.
    #[inline(always)]
    pub const fn all() -> [Self; 4] {
        [Self::Classic, Self::Protoss, Self::Terran, Self::Zerg]
    }

    /// Health a fresh piece of this race starts with.
    #[inline(always)]
    pub const fn max_health(&self) -> f64 {
        match self {
            Self::Protoss => 0.5,
            Self::Classic | Self::Terran | Self::Zerg => 1.0,
        }
    }

    /// Shield a fresh piece of this race starts with.
    ///
    /// Only Protoss pieces carry a shield.
    #[inline(always)]
    pub const fn max_shield(&self) -> f64 {
        match self {
            Self::Protoss => 0.5,
            Self::Classic | Self::Terran | Self::Zerg => 0.0,
        }
    }

    /// Lowercase name of this race.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Protoss => "protoss",
            Self::Terran => "terran",
            Self::Zerg => "zerg",
        }
    }
}

impl FromStr for Race {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|race| race.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Invalid str for Race: Got {s:?}"))
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
