use super::item_view::ItemView;

/// Handle to a slot in an [`ItemPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotHandle(usize);

/// Slot storage that exclusively owns every live [`ItemView`].
///
/// Vacated slots are reused before the backing vector grows, so a stable
/// or shrinking item count never allocates.
#[derive(Debug, Default)]
pub struct ItemPool {
    slots: Vec<Option<ItemView>>,
    vacant: Vec<usize>,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a view and return its handle.
    pub fn checkin(&mut self, view: ItemView) -> SlotHandle {
        match self.vacant.pop() {
            Some(index) => {
                self.slots[index] = Some(view);
                SlotHandle(index)
            }
            None => {
                self.slots.push(Some(view));
                SlotHandle(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, handle: SlotHandle) -> Option<&ItemView> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut ItemView> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Take a view out, vacating its slot.
    pub fn release(&mut self, handle: SlotHandle) -> Option<ItemView> {
        let view = self.slots.get_mut(handle.0)?.take()?;
        self.vacant.push(handle.0);
        Some(view)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
