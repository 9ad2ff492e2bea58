use crate::callbacks::Navigator;

/// Mode history for one pathway. Back pops the last mode; navigating to the
/// mode already shown records nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayNavigation<M> {
    initial: M,
    current: M,
    history: Vec<M>,
}

impl<M: Clone + PartialEq> PathwayNavigation<M> {
    pub fn new(initial: M) -> Self {
        Self {
            current: initial.clone(),
            initial,
            history: Vec::new(),
        }
    }

    pub fn current_mode(&self) -> &M {
        &self.current
    }

    pub fn navigate_to_mode(&mut self, mode: M) {
        if mode == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, mode);
        self.history.push(previous);
    }

    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self) -> &[M] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.history.clear();
    }
}

impl<M: Clone + PartialEq> Navigator<M> for PathwayNavigation<M> {
    fn navigate_to(&mut self, mode: M) {
        self.navigate_to_mode(mode);
    }
}
