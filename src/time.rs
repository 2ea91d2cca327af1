/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context};

/// An absolute moment on the in-game clock.
///
/// Measured in "chess moves": a piece needs exactly one unit of time to move one square.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct GameTime(pub(crate) f64);

/// A relative amount of in-game time.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct TimeDelta(pub(crate) f64);

impl GameTime {
    /// The moment every game starts at.
    pub const ZERO: Self = Self(0.0);

    #[inline(always)]
    pub const fn new(t: f64) -> Self {
        Self(t)
    }

    #[inline(always)]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Number of whole time units that have passed.
    ///
    /// # Example
    /// ```
    /// # use tempo::GameTime;
    /// assert_eq!(GameTime::new(2.75).whole_moves(), 2);
    /// ```
    #[inline(always)]
    pub fn whole_moves(&self) -> u32 {
        self.0.max(0.0).floor() as u32
    }
}

impl TimeDelta {
    /// The largest step the simulation will ever take at once.
    pub const MAX_TICK: Self = Self(0.25);

    /// The time it takes for one action to complete.
    pub const ONE_MOVE: Self = Self(1.0);

    pub const ZERO: Self = Self(0.0);

    #[inline(always)]
    pub const fn new(dt: f64) -> Self {
        Self(dt)
    }

    #[inline(always)]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// `true` if this is a finite, non-negative amount of time.
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// Splits this delta into steps of at most `max`, in order.
    ///
    /// The last step holds the remainder, which may be zero. An invalid delta yields no steps,
    /// and a `max` that is not a positive, finite step is replaced by [`TimeDelta::MAX_TICK`].
    ///
    /// # Example
    /// ```
    /// # use tempo::TimeDelta;
    /// let steps = TimeDelta::new(0.6).chunks(TimeDelta::MAX_TICK);
    /// assert_eq!(steps.len(), 3);
    /// assert_eq!(steps[0], TimeDelta::MAX_TICK);
    /// assert!((steps[2].get() - 0.1).abs() < 1e-9);
    /// ```
    pub fn chunks(self, max: Self) -> Vec<Self> {
        if !self.is_valid() {
            return Vec::new();
        }
        let max = if max.is_valid() && max.0 > 0.0 {
            max
        } else {
            Self::MAX_TICK
        };

        let mut steps = Vec::new();
        let mut to_do = self;
        while to_do > max {
            steps.push(max);
            to_do = to_do - max;
        }
        steps.push(to_do);
        steps
    }
}

macro_rules! impl_time_ops {
    ($t:ty, $rhs:ty, $out:ty, $trait:ident, $fn:ident, $op:tt) => {
        impl std::ops::$trait<$rhs> for $t {
            type Output = $out;

            #[inline(always)]
            fn $fn(self, rhs: $rhs) -> Self::Output {
                <$out>::new(self.0 $op rhs.0)
            }
        }
    };
}

macro_rules! impl_time_assign_ops {
    ($t:ty, $rhs:ty, $trait:ident, $fn:ident, $op:tt) => {
        impl std::ops::$trait<$rhs> for $t {
            #[inline(always)]
            fn $fn(&mut self, rhs: $rhs) {
                self.0 $op rhs.0;
            }
        }
    };
}

impl_time_ops!(GameTime, TimeDelta, GameTime, Add, add, +);
impl_time_ops!(GameTime, TimeDelta, GameTime, Sub, sub, -);
impl_time_ops!(GameTime, GameTime, TimeDelta, Sub, sub, -);
impl_time_ops!(TimeDelta, TimeDelta, TimeDelta, Add, add, +);
impl_time_ops!(TimeDelta, TimeDelta, TimeDelta, Sub, sub, -);

impl_time_assign_ops!(GameTime, TimeDelta, AddAssign, add_assign, +=);
impl_time_assign_ops!(TimeDelta, TimeDelta, AddAssign, add_assign, +=);

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl fmt::Display for TimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for TimeDelta {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt: f64 = s
            .parse()
            .context(format!("Invalid TimeDelta: Expected a number. Got {s:?}"))?;
        if !Self(dt).is_valid() {
            bail!("Invalid TimeDelta: Must be a finite, non-negative number. Got {dt}");
        }
        Ok(Self(dt))
    }
}
