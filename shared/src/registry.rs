/// Generational handle to an entry of a [`Registry`].
///
/// # Bit layout
/// Packed into a `u64` (least-significant bit = bit 0):
///
/// - bits 0..=31  : slot index (u32)
/// - bits 32..=63 : slot generation (u32)
///
/// # Invariants
/// - A handle resolves only while its slot still holds the generation it was issued with.
/// - Freeing a slot or clearing the registry bumps the generation, so older handles go stale
///   instead of aliasing whatever is inserted next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterHandle(u64);

impl CharacterHandle {
    /// Packs a slot index and generation into a handle.
    pub fn pack(index: u32, generation: u32) -> Self {
        Self((index as u64) | ((generation as u64) << u32::BITS))
    }

    pub fn index(self) -> u32 {
        const INDEX_MASK: u64 = u32::MAX as u64;
        (self.0 & INDEX_MASK) as u32
    }

    pub fn generation(self) -> u32 {
        (self.0 >> u32::BITS) as u32
    }

    pub fn to_bits(self) -> u64 {
        self.0
    }

    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot arena owning values addressed by [`CharacterHandle`].
#[derive(Debug)]
pub struct Registry<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&mut self, value: T) -> CharacterHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return CharacterHandle::pack(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        CharacterHandle::pack(index, 0)
    }

    pub fn contains(&self, handle: CharacterHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: CharacterHandle) -> Option<&T> {
        self.slots
            .get(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: CharacterHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn remove(&mut self, handle: CharacterHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index());
        Some(value)
    }

    /// Remove every value, invalidating all outstanding handles.
    pub fn clear(&mut self) -> Vec<T> {
        let mut removed = Vec::with_capacity(self.len());
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(value) = slot.value.take() {
                removed.push(value);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index as u32);
        }
        // Reuse low indices first.
        self.free.reverse();
        removed
    }

    /// First handle whose value matches `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<CharacterHandle> {
        self.iter()
            .find(|(_, value)| predicate(value))
            .map(|(handle, _)| handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CharacterHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (CharacterHandle::pack(index as u32, slot.generation), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CharacterHandle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(move |value| (CharacterHandle::pack(index as u32, generation), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_places_index_in_low_bits_and_generation_in_high_bits() {
        let handle = CharacterHandle::pack(0x0123_4567, 0x89AB_CDEF);

        assert_eq!(handle.to_bits(), 0x89AB_CDEF_0123_4567);
        assert_eq!(handle.index(), 0x0123_4567);
        assert_eq!(handle.generation(), 0x89AB_CDEF);
        assert_eq!(CharacterHandle::from_bits(handle.to_bits()), handle);
    }

    #[test]
    fn insert_then_get() {
        let mut registry = Registry::new();
        let a = registry.insert("jack");
        let b = registry.insert("jill");

        assert_eq!(registry.get(a), Some(&"jack"));
        assert_eq!(registry.get(b), Some(&"jill"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn removed_slot_is_reused_with_new_generation() {
        let mut registry = Registry::new();
        let a = registry.insert(1);
        assert_eq!(registry.remove(a), Some(1));
        assert_eq!(registry.remove(a), None);

        let b = registry.insert(2);
        assert_eq!(b.index(), a.index());
        assert_ne!(b.generation(), a.generation());
        assert_eq!(registry.get(a), None);
        assert_eq!(registry.get(b), Some(&2));
    }

    #[test]
    fn clear_invalidates_outstanding_handles() {
        let mut registry = Registry::new();
        let a = registry.insert("jack");
        let _ = registry.insert("jill");

        let removed = registry.clear();
        assert_eq!(removed, vec!["jack", "jill"]);
        assert!(registry.is_empty());
        assert!(!registry.contains(a));

        let again = registry.insert("jack");
        assert_eq!(again.index(), 0);
        assert!(registry.contains(again));
        assert!(!registry.contains(a));
    }

    #[test]
    fn find_returns_live_handle() {
        let mut registry = Registry::new();
        let _ = registry.insert("jill");
        let jack = registry.insert("jack");

        assert_eq!(registry.find(|name| *name == "jack"), Some(jack));
        assert_eq!(registry.find(|name| *name == "bob"), None);
    }

    #[test]
    fn iter_mut_visits_live_values_only() {
        let mut registry = Registry::new();
        let a = registry.insert(1);
        let _ = registry.insert(2);
        let _ = registry.insert(3);
        registry.remove(a);

        for (_, value) in registry.iter_mut() {
            *value *= 10;
        }
        let values: Vec<_> = registry.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![20, 30]);
    }
}
