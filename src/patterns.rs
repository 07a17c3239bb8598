/// A static stamp: live cells as (row, col) offsets, plus the offset that lands on the
/// target cell when stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub origin: (i32, i32),
    pub cells: &'static [(i32, i32)],
}

impl Pattern {
    /// cell offsets relative to `origin`, after rotation
    pub fn rotated_cells(&self, rotation: Rotation) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (or, oc) = self.origin;
        self.cells
            .iter()
            .map(move |&(r, c)| rotation.apply((r - or, c - oc)))
    }
}

/// Quarter-turn rotation of a stamp. Rotates (dr, dc) around (0, 0) with exact integer
/// arithmetic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    #[inline]
    pub fn apply(self, (dr, dc): (i32, i32)) -> (i32, i32) {
        match self {
            Rotation::R0 => (dr, dc),
            Rotation::R90 => (-dc, dr),
            Rotation::R180 => (-dr, -dc),
            Rotation::R270 => (dc, -dr),
        }
    }

    /// the next rotation, 90 degrees further
    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Normalizes any angle modulo 360 and snaps it to the nearest quarter turn.
    /// Exactly halfway angles (45, 135, ...) round up.
    pub fn from_degrees(degrees: i32) -> Self {
        let normalized = degrees.rem_euclid(360);
        Self::ALL[(((normalized + 45) / 90) % 4) as usize]
    }
}

#[rustfmt::skip]
pub const PULSAR: Pattern = Pattern {
    name: "Pulsar",
    origin: (6, 6),
    cells: &[
        (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
        (2, 0), (3, 0), (4, 0), (2, 5), (3, 5), (4, 5),
        (2, 7), (3, 7), (4, 7), (2, 12), (3, 12), (4, 12),
        (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
        (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
        (8, 0), (9, 0), (10, 0), (8, 5), (9, 5), (10, 5),
        (8, 7), (9, 7), (10, 7), (8, 12), (9, 12), (10, 12),
        (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
    ],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    origin: (1, 1),
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

#[rustfmt::skip]
pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "Gosper Glider Gun",
    origin: (4, 17),
    cells: &[
        // left block
        (4, 0), (4, 1), (5, 0), (5, 1),
        // left ship
        (2, 12), (2, 13), (3, 11), (3, 15), (4, 10), (4, 16), (5, 10), (5, 14),
        (5, 16), (5, 17), (6, 10), (6, 16), (7, 11), (7, 15), (8, 12), (8, 13),
        // right ship
        (0, 24), (1, 22), (1, 24), (2, 20), (2, 21), (3, 20), (3, 21), (4, 20),
        (4, 21), (5, 22), (5, 24), (6, 24),
        // right block
        (2, 34), (2, 35), (3, 34), (3, 35),
    ],
};

pub const EATER: Pattern = Pattern {
    name: "Eater",
    origin: (1, 1),
    cells: &[(0, 0), (0, 1), (1, 0), (2, 1), (2, 2), (3, 2)],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    origin: (0, 0),
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    origin: (1, 0),
    cells: &[(1, 0), (1, 1), (1, 2)],
};

/// the selectable stamps, in cycling order
pub const SHAPES: &[Pattern] = &[PULSAR, GLIDER, GOSPER_GLIDER_GUN, EATER, BLOCK, BLINKER];
