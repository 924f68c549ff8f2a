use super::Message;

/// What the UI needs to draw a session when it attaches: the restored
/// history plus where the quota stands.
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub remaining: usize,
    pub ceiling: usize,
}

impl SessionSnapshot {
    pub fn is_exhausted(&self) -> bool {
        return self.remaining == 0;
    }
}
