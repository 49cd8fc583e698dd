use crate::objects::body::Body;

/// A stable reference to a body inside a [`BodyStore`].
///
/// Handles stay valid while the body is alive; destroying the body bumps the
/// slot generation, so stale handles resolve to `None` instead of aliasing a
/// later body that reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Generational arena owning every body in a world.
///
/// Bodies never move while alive, which lets contacts and pairs carry plain
/// handles across a tick.
#[derive(Debug, Default)]
pub struct BodyStore {
    slots: Vec<Slot>,
    free: Vec<usize>,
    len: usize,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, body: Body) -> BodyHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.body = Some(body);
            BodyHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                body: Some(body),
            });
            BodyHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Removes and returns the body, invalidating the handle (and any copy
    /// of it). Returns `None` for stale handles.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation || slot.body.is_none() {
            return None;
        }
        let body = slot.body.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        body
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    /// Mutable access to two distinct bodies at once, via `split_at_mut`.
    /// Returns `None` if either handle is stale or both refer to the same
    /// slot.
    pub fn get_disjoint_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut Body, &mut Body)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }
        if a.index < b.index {
            let (left, right) = self.slots.split_at_mut(b.index);
            Some((
                left[a.index].body.as_mut()?,
                right[0].body.as_mut()?,
            ))
        } else {
            let (left, right) = self.slots.split_at_mut(a.index);
            Some((
                right[0].body.as_mut()?,
                left[b.index].body.as_mut()?,
            ))
        }
    }
}
