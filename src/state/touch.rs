/// Which finger, if any, is driving a touch pan. Extra fingers are ignored.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TouchState {
    pub active_id: Option<i32>,
}

impl TouchState {
    /// Claim the pan for `id` if no other finger holds it.
    pub fn start(&mut self, id: i32) -> bool {
        if self.active_id.is_some() {
            return false;
        }
        self.active_id = Some(id);
        true
    }

    pub fn is_active(&self, id: i32) -> bool {
        self.active_id == Some(id)
    }

    /// Release the pan if `id` was holding it.
    pub fn end(&mut self, id: i32) -> bool {
        if self.is_active(id) {
            self.active_id = None;
            true
        } else {
            false
        }
    }
}
