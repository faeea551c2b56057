use num_traits::{One, PrimInt};

/// Trait implemented by button/flag enums.
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index.
/// The backing integer type is chosen via the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// Plain bitmask container for held buttons.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits | tag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits & !tag.mask();
    }

    /// Add or remove `tag` depending on `down`.
    pub fn set<U: FlagBitmask<Storage = T>>(&mut self, tag: U, down: bool) {
        if down {
            self.add(tag);
        } else {
            self.remove(tag);
        }
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        (self.bits & tag.mask()) != T::zero()
    }

    pub fn has_any<U: FlagBitmask<Storage = T> + Copy>(&self, tags: &[U]) -> bool {
        let combined = tags.iter().fold(T::zero(), |acc, t| acc | t.mask());
        (self.bits & combined) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }

    pub fn clear(&mut self) {
        self.bits = T::zero();
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// Example:
/// ```ignore
/// define_bitmask_flags!(PadButton, u8, {
///     Start,
///     Select,
/// });
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($(#[$meta:meta])* $name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_bitmask_flags!(PadButton, u8, { Start, Select, Shoulder });

    #[test]
    fn set_toggles_single_bit() {
        let mut flags = BitmaskFlags::<u8>::default();
        flags.set(PadButton::Select, true);
        assert_eq!(flags.bits, 0b010);
        assert!(flags.has(PadButton::Select));
        assert!(!flags.has(PadButton::Start));

        flags.set(PadButton::Select, false);
        assert!(flags.is_empty());
    }

    #[test]
    fn has_any_of_empty_slice_is_false() {
        let flags = BitmaskFlags::new(0xFFu8);
        assert!(!flags.has_any::<PadButton>(&[]));
        assert!(flags.has_any(&[PadButton::Shoulder]));
    }

    #[test]
    fn clear_drops_every_bit() {
        let mut flags = BitmaskFlags::<u8>::default();
        flags.add(PadButton::Start);
        flags.add(PadButton::Shoulder);
        flags.clear();
        assert!(flags.is_empty());
    }
}
