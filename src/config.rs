//! Bounds for configuration values.

//------------ DefMinMax -----------------------------------------------------

/// The default, minimum, and maximum values for a config variable.
#[derive(Clone, Copy, Debug)]
pub struct DefMinMax<T> {
    /// The default value,
    def: T,

    /// The minimum value,
    min: T,

    /// The maximum value,
    max: T,
}

impl<T: Copy> DefMinMax<T> {
    /// Creates a new value.
    pub const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default value.
    pub const fn default(&self) -> T {
        self.def
    }

    /// Returns the minimum value.
    pub const fn min(&self) -> T {
        self.min
    }

    /// Returns the maximum value.
    pub const fn max(&self) -> T {
        self.max
    }
}

//------------ OFFSET --------------------------------------------------------

/// The range of offsets a codec can be configured with.
///
/// The largest offset is chosen so that shifting the octet 0xFF still
/// results in a valid Unicode scalar value.
pub const OFFSET: DefMinMax<u32> =
    DefMinMax::new(0xFF, 0, char::MAX as u32 - 0xFF);

//============ Test ==========================================================
