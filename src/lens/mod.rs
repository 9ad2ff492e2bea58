//! Paired getter/setter focusing step logic onto one part of a larger state.
//!
//! `set` never mutates: it builds a new container. Every lens handed to a
//! callback factory must satisfy `get(&set(c, p)) == p`.

use std::fmt;
use std::sync::Arc;

type Getter<C, P> = Arc<dyn Fn(&C) -> P + Send + Sync>;
type Setter<C, P> = Arc<dyn Fn(&C, P) -> C + Send + Sync>;

pub struct Lens<C, P> {
    get: Getter<C, P>,
    set: Setter<C, P>,
}

impl<C, P> Clone for Lens<C, P> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<C, P> fmt::Debug for Lens<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens")
            .field("container", &std::any::type_name::<C>())
            .field("part", &std::any::type_name::<P>())
            .finish()
    }
}

impl<C, P> Lens<C, P> {
    pub fn new(
        get: impl Fn(&C) -> P + Send + Sync + 'static,
        set: impl Fn(&C, P) -> C + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    pub fn get(&self, container: &C) -> P {
        (self.get)(container)
    }

    pub fn set(&self, container: &C, part: P) -> C {
        (self.set)(container, part)
    }

    pub fn modify(&self, container: &C, f: impl FnOnce(P) -> P) -> C {
        self.set(container, f(self.get(container)))
    }

    /// Like [`Lens::modify`], but a failed mutation yields no container at all.
    pub fn try_modify<E>(
        &self,
        container: &C,
        f: impl FnOnce(P) -> Result<P, E>,
    ) -> Result<C, E> {
        let part = f(self.get(container))?;
        Ok(self.set(container, part))
    }
}

impl<C: 'static, P: 'static> Lens<C, P> {
    /// Focuses further into `P` through `inner`.
    pub fn compose<Q: 'static>(&self, inner: Lens<P, Q>) -> Lens<C, Q> {
        let outer_get = self.clone();
        let inner_get = inner.clone();
        let outer_set = self.clone();
        Lens::new(
            move |container: &C| inner_get.get(&outer_get.get(container)),
            move |container: &C, value: Q| {
                let part = outer_set.get(container);
                outer_set.set(container, inner.set(&part, value))
            },
        )
    }
}

impl<C: Clone + 'static> Lens<C, C> {
    pub fn identity() -> Self {
        Lens::new(|container: &C| container.clone(), |_: &C, value: C| value)
    }
}
