/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::{Color, PieceKind};

/// Directions a rook slides in, as `(file_delta, rank_delta)`.
pub const ROOK_DELTAS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Directions a bishop slides in, as `(file_delta, rank_delta)`.
pub const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Directions a queen slides in, and the king steps in.
pub const QUEEN_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Jumps a knight can make, as `(file_delta, rank_delta)`.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Represents a single square on an `8x8` chess board.
///
/// Squares use least-significant file mapping, so `square = file + rank * 8`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

macro_rules! square_consts {
    ($($name:ident = $file:ident $rank:ident),* $(,)?) => {
        impl Square {
            $(pub const $name: Self = Self::new(File::$file, Rank::$rank);)*
        }
    };
}

#[rustfmt::skip]
square_consts!(
    A1 = A ONE, B1 = B ONE, C1 = C ONE, D1 = D ONE, E1 = E ONE, F1 = F ONE, G1 = G ONE, H1 = H ONE,
    A2 = A TWO, B2 = B TWO, C2 = C TWO, D2 = D TWO, E2 = E TWO, F2 = F TWO, G2 = G TWO, H2 = H TWO,
    A3 = A THREE, B3 = B THREE, C3 = C THREE, D3 = D THREE, E3 = E THREE, F3 = F THREE, G3 = G THREE, H3 = H THREE,
    A4 = A FOUR, B4 = B FOUR, C4 = C FOUR, D4 = D FOUR, E4 = E FOUR, F4 = F FOUR, G4 = G FOUR, H4 = H FOUR,
    A5 = A FIVE, B5 = B FIVE, C5 = C FIVE, D5 = D FIVE, E5 = E FIVE, F5 = F FIVE, G5 = G FIVE, H5 = H FIVE,
    A6 = A SIX, B6 = B SIX, C6 = C SIX, D6 = D SIX, E6 = E SIX, F6 = F SIX, G6 = G SIX, H6 = H SIX,
    A7 = A SEVEN, B7 = B SEVEN, C7 = C SEVEN, D7 = D SEVEN, E7 = E SEVEN, F7 = F SEVEN, G7 = G SEVEN, H7 = H SEVEN,
    A8 = A EIGHT, B8 = B EIGHT, C8 = C EIGHT, D8 = D EIGHT, E8 = E EIGHT, F8 = F EIGHT, G8 = G EIGHT, H8 = H EIGHT,
);

impl Square {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Returns an iterator over all squares, from `a1` to `h8`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use tempo::{Square, File, Rank};
    /// assert_eq!(Square::new(File::C, Rank::FOUR), Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 ^ rank.0 << 3)
    }

    /// Creates a new [`Square`] from an index in `[0, 63]`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert_eq!(Square::from_index(26).unwrap(), Square::C4);
    /// assert!(Square::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// The square the king of `color` starts the game on.
    #[inline(always)]
    pub const fn king_start(color: Color) -> Self {
        Self::new(File::E, Rank::first(color))
    }

    /// The square the king lands on after castling on the given side.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Square};
    /// assert_eq!(Square::king_castle_target(Color::White, true), Square::G1);
    /// assert_eq!(Square::king_castle_target(Color::Black, false), Square::C8);
    /// ```
    #[inline(always)]
    pub const fn king_castle_target(color: Color, kingside: bool) -> Self {
        let file = if kingside { File::G } else { File::C };
        Self::new(file, Rank::first(color))
    }

    /// The corner square a castling rook starts on.
    #[inline(always)]
    pub const fn rook_castle_origin(color: Color, kingside: bool) -> Self {
        let file = if kingside { File::H } else { File::A };
        Self::new(file, Rank::first(color))
    }

    /// The square a castling rook lands on.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Square};
    /// assert_eq!(Square::rook_castle_target(Color::White, true), Square::F1);
    /// assert_eq!(Square::rook_castle_target(Color::Black, false), Square::D8);
    /// ```
    #[inline(always)]
    pub const fn rook_castle_target(color: Color, kingside: bool) -> Self {
        let file = if kingside { File::F } else { File::D };
        Self::new(file, Rank::first(color))
    }

    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & 0b0000_0111)
    }

    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Number of files between `self` and `other`.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().0.abs_diff(other.file().0)
    }

    /// Number of ranks between `self` and `other`.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().0.abs_diff(other.rank().0)
    }

    /// Chebyshev ("king step") distance between `self` and `other`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert_eq!(Square::A1.distance_chebyshev(Square::C2), 2);
    /// ```
    #[inline(always)]
    pub const fn distance_chebyshev(&self, other: Self) -> u8 {
        let files = self.distance_files(other);
        let ranks = self.distance_ranks(other);
        if files > ranks {
            files
        } else {
            ranks
        }
    }

    /// `true` if `other` is one king step away from `self`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert!(Square::E4.is_adjacent(Square::F5));
    /// assert!(!Square::E4.is_adjacent(Square::E4));
    /// assert!(!Square::E4.is_adjacent(Square::E6));
    /// ```
    #[inline(always)]
    pub const fn is_adjacent(&self, other: Self) -> bool {
        self.distance_chebyshev(other) == 1
    }

    /// `true` if `other` touches `self` diagonally.
    #[inline(always)]
    pub const fn is_adjacent_diagonal(&self, other: Self) -> bool {
        self.distance_files(other) == 1 && self.distance_ranks(other) == 1
    }

    #[inline(always)]
    pub const fn is_on_same_rank(&self, other: Self) -> bool {
        self.rank().0 == other.rank().0
    }

    #[inline(always)]
    pub const fn is_on_same_file(&self, other: Self) -> bool {
        self.file().0 == other.file().0
    }

    /// `true` if `self` and `other` share a diagonal or anti-diagonal.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert!(Square::C1.is_on_same_diagonal(Square::H6));
    /// assert!(Square::A8.is_on_same_diagonal(Square::H1));
    /// assert!(!Square::C1.is_on_same_diagonal(Square::C3));
    /// ```
    #[inline(always)]
    pub const fn is_on_same_diagonal(&self, other: Self) -> bool {
        self.distance_files(other) == self.distance_ranks(other)
    }

    /// `true` if a knight could jump between `self` and `other`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert!(Square::G1.is_knight_jump(Square::F3));
    /// assert!(!Square::G1.is_knight_jump(Square::G3));
    /// ```
    #[inline(always)]
    pub const fn is_knight_jump(&self, other: Self) -> bool {
        let files = self.distance_files(other);
        let ranks = self.distance_ranks(other);
        (files == 1 && ranks == 2) || (files == 2 && ranks == 1)
    }

    /// `true` if `to` lies on a strictly higher rank than `self`, as seen by `color`.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, Square};
    /// assert!(Square::E2.is_forward(Color::White, Square::E4));
    /// assert!(Square::E7.is_forward(Color::Black, Square::D6));
    /// assert!(!Square::E2.is_forward(Color::Black, Square::E4));
    /// ```
    #[inline(always)]
    pub const fn is_forward(&self, color: Color, to: Self) -> bool {
        match color {
            Color::White => to.rank().0 > self.rank().0,
            Color::Black => to.rank().0 < self.rank().0,
        }
    }

    /// Attempt to offset this [`Square`] by the file and rank deltas.
    ///
    /// Returns `None` when that would leave the board.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file().offset(file_delta) else {
            return None;
        };
        let Some(rank) = self.rank().offset(rank_delta) else {
            return None;
        };
        Some(Self::new(file, rank))
    }

    /// Moves `n` ranks towards the far side of the board, as seen by `color`.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Square, Color};
    /// assert_eq!(Square::C4.forward_by(Color::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 2), Some(Square::C2));
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.negation_multiplier())
    }

    /// Walks from `self` in one direction, yielding every square until the edge of the board.
    ///
    /// `self` is not included.
    #[inline(always)]
    pub fn ray(self, file_delta: i8, rank_delta: i8) -> impl Iterator<Item = Self> {
        std::iter::successors(self.offset(file_delta, rank_delta), move |sq| {
            sq.offset(file_delta, rank_delta)
        })
    }

    /// Squares strictly between `self` and `to`, walking from `self`.
    ///
    /// Empty if the two squares are adjacent, identical, or not on a shared line.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert_eq!(Square::A1.squares_between(Square::D4), vec![Square::B2, Square::C3]);
    /// assert!(Square::A1.squares_between(Square::B3).is_empty());
    /// ```
    pub fn squares_between(self, to: Self) -> Vec<Self> {
        let lined_up = self.is_on_same_rank(to)
            || self.is_on_same_file(to)
            || self.is_on_same_diagonal(to);
        if self == to || !lined_up {
            return Vec::new();
        }

        let file_delta = (to.file().0 as i8 - self.file().0 as i8).signum();
        let rank_delta = (to.rank().0 as i8 - self.rank().0 as i8).signum();
        self.ray(file_delta, rank_delta)
            .take_while(|&sq| sq != to)
            .collect()
    }

    /// Candidate target squares for a piece of `kind` standing on `self`, grouped by direction.
    ///
    /// Each inner list is ordered outwards from `self`, so a caller can stop at the first blocker.
    /// Knights and kings produce one single-square group per target. Pawns produce their pushes
    /// as one group and each diagonal capture as its own group.
    pub fn target_rays(self, color: Color, kind: PieceKind) -> Vec<Vec<Self>> {
        let slide = |deltas: &[(i8, i8)]| -> Vec<Vec<Self>> {
            deltas
                .iter()
                .map(|&(df, dr)| self.ray(df, dr).collect::<Vec<_>>())
                .filter(|ray| !ray.is_empty())
                .collect()
        };
        let step = |deltas: &[(i8, i8)]| -> Vec<Vec<Self>> {
            deltas
                .iter()
                .filter_map(|&(df, dr)| self.offset(df, dr))
                .map(|sq| vec![sq])
                .collect()
        };

        match kind {
            PieceKind::Rook => slide(&ROOK_DELTAS),
            PieceKind::Bishop => slide(&BISHOP_DELTAS),
            PieceKind::Queen => slide(&QUEEN_DELTAS),
            PieceKind::Knight => step(&KNIGHT_DELTAS),
            PieceKind::King => step(&QUEEN_DELTAS),
            PieceKind::Pawn => {
                let pushes = if self.rank() == Rank::second(color) { 2 } else { 1 };
                let mut rays = Vec::with_capacity(3);
                let forward = (1..=pushes)
                    .filter_map(|n| self.forward_by(color, n))
                    .collect::<Vec<_>>();
                if !forward.is_empty() {
                    rays.push(forward);
                }
                let dr = color.negation_multiplier();
                rays.extend(step(&[(-1, dr), (1, dr)]));
                rays
            }
        }
    }

    /// Parses a square from algebraic notation, such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert_eq!(Square::from_uci("c4").unwrap(), Square::C4);
    /// assert!(Square::from_uci("z0").is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        };

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }

    /// Converts this [`Square`] to algebraic notation.
    ///
    /// # Example
    /// ```
    /// # use tempo::Square;
    /// assert_eq!("c4", Square::C4.to_uci());
    /// ```
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// One of the eight ranks of the board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all ranks, from `1` to `8`.
    ///
    /// # Example
    /// ```
    /// # use tempo::Rank;
    /// let mut iter = Rank::iter();
    /// assert_eq!(iter.next().unwrap(), Rank::ONE);
    /// assert_eq!(iter.last().unwrap(), Rank::EIGHT);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`Rank`] from an index in `[0, 7]`.
    #[inline(always)]
    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            bail!("Invalid int for Rank: Must be between [0, 7]. Got {rank}");
        }
        Ok(Self(rank))
    }

    /// Home rank of `color`.
    #[inline(always)]
    pub const fn first(color: Color) -> Self {
        [Self::ONE, Self::EIGHT][color.index()]
    }

    /// Rank the pawns of `color` start on.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        [Self::TWO, Self::SEVEN][color.index()]
    }

    /// Rank a pawn of `color` must stand on to capture en passant.
    #[inline(always)]
    pub const fn fifth(color: Color) -> Self {
        [Self::FIVE, Self::FOUR][color.index()]
    }

    /// Rank on which a pawn of `color` promotes.
    #[inline(always)]
    pub const fn eighth(color: Color) -> Self {
        [Self::EIGHT, Self::ONE][color.index()]
    }

    #[inline(always)]
    pub fn from_char(rank: char) -> Result<Self> {
        let rank_int = rank
            .to_digit(10)
            .context(format!("Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"))?;
        let rank = rank_int
            .checked_sub(1)
            .context(format!("Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"))?;
        Self::new(rank as u8)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (b'1' + self.0) as char
    }

    /// Offsets this rank by `delta`, returning `None` if that leaves the board.
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new = self.0 as i8 + delta;
        if new < 0 || new > Self::MAX as i8 {
            return None;
        }
        Some(Self(new as u8))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// One of the eight files of the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all files, from `a` to `h`.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..=Self::MAX).map(Self)
    }

    /// Construct a new [`File`] from an index in `[0, 7]`.
    #[inline(always)]
    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            bail!("Invalid int for File: Must be between [0, 7]. Got {file}");
        }
        Ok(Self(file))
    }

    #[inline(always)]
    pub fn from_char(file: char) -> Result<Self> {
        if !('a'..='h').contains(&file) {
            bail!("Invalid char for File: Must be between [a, h]. Got {file:?}");
        }
        Ok(Self(file as u8 - b'a'))
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (b'a' + self.0) as char
    }

    /// Offsets this file by `delta`, returning `None` if that leaves the board.
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let new = self.0 as i8 + delta;
        if new < 0 || new > Self::MAX as i8 {
            return None;
        }
        Some(Self(new as u8))
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        assert_eq!(Square::new(File(0), Rank(0)).to_string(), "a1");
        assert_eq!(Square::new(File(7), Rank(0)).to_string(), "h1");
        assert_eq!(Square::new(File(0), Rank(7)).to_string(), "a8");
        assert_eq!(Square::new(File(7), Rank(7)).to_string(), "h8");
        assert_eq!(Square::new(File(3), Rank(3)).to_string(), "d4");
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Rank::from_char('1').unwrap(), Rank::ONE);
        assert_eq!(Rank::from_char('8').unwrap(), Rank::EIGHT);
        assert!(Rank::from_char('0').is_err());
        assert!(Rank::from_char('9').is_err());
        assert_eq!(File::from_char('a').unwrap(), File::A);
        assert!(File::from_char('z').is_err());

        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("a10").is_err());
        assert!(Square::try_from("").is_err());
    }

    #[test]
    fn test_knight_jumps_are_symmetric() {
        for from in Square::iter() {
            for to in Square::iter() {
                assert_eq!(from.is_knight_jump(to), to.is_knight_jump(from));
            }
        }
        let jumps = Square::iter().filter(|sq| Square::D4.is_knight_jump(*sq)).count();
        assert_eq!(jumps, 8);
    }

    #[test]
    fn test_rook_rays_stop_at_edges() {
        let rays = Square::A1.target_rays(Color::White, PieceKind::Rook);
        assert_eq!(rays.len(), 2);
        assert!(rays.iter().all(|ray| ray.len() == 7));
        assert_eq!(rays[0][0], Square::A2);
    }

    #[test]
    fn test_pawn_rays() {
        let rays = Square::E2.target_rays(Color::White, PieceKind::Pawn);
        assert_eq!(rays[0], vec![Square::E3, Square::E4]);
        assert_eq!(rays.len(), 3);

        let rays = Square::A7.target_rays(Color::Black, PieceKind::Pawn);
        assert_eq!(rays[0], vec![Square::A6, Square::A5]);
        assert_eq!(rays[1], vec![Square::B6]);

        // Pawns on the last rank have no pushes left
        assert!(Square::H8.target_rays(Color::White, PieceKind::Pawn).is_empty());
    }

    #[test]
    fn test_squares_between() {
        assert_eq!(Square::E1.squares_between(Square::H1), vec![Square::F1, Square::G1]);
        assert_eq!(Square::H8.squares_between(Square::H6), vec![Square::H7]);
        assert!(Square::E1.squares_between(Square::E2).is_empty());
    }
}
