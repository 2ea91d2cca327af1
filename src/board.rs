/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Colors, piece kinds, and races.
mod kind;

/// The live set of pieces and every query over it.
mod position;

/// Named starting positions.
mod scenario;

/// Squares, files, ranks, and board geometry.
mod square;

pub use kind::*;
pub use position::*;
pub use scenario::*;
pub use square::*;
