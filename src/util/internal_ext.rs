use std::ops::ControlFlow;

use internal_iterator::InternalIterator;

pub trait InternalIteratorExt: InternalIterator {
    /// Call `f` on each item for as long as it keeps returning `true`.
    /// Returns whether the loop was cut short, which search code uses to report a cutoff.
    fn for_each_while(self, mut f: impl FnMut(Self::Item) -> bool) -> bool {
        self.try_for_each(|x| {
            if f(x) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
        .is_break()
    }
}

impl<I: InternalIterator> InternalIteratorExt for I {}
