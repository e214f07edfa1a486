use core::cell::RefCell;

use critical_section::Mutex;

use crate::InOut;

/// Runs `f` on the value in `mutex`, inside a critical section.
///
/// ```
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use inout_ref::{with_locked, InOut};
///
/// static COUNTER: Mutex<RefCell<u32>> = Mutex::new(RefCell::new(0));
///
/// fn increment(mut counter: InOut<'_, u32>) {
///     *counter += 1;
/// }
///
/// with_locked(&COUNTER, increment);
/// with_locked(&COUNTER, increment);
///
/// assert_eq!(with_locked(&COUNTER, |counter| *counter), 2);
/// ```
///
/// # Panics
///
/// If the value is already borrowed, which happens when `f` locks the same mutex again. Use
/// [`try_with_locked`] where that can happen.
pub fn with_locked<T, R, F>(mutex: &Mutex<RefCell<T>>, f: F) -> R
where
    F: FnOnce(InOut<'_, T>) -> R,
{
    critical_section::with(|cs| {
        let mut value = mutex.borrow_ref_mut(cs);
        f(InOut::new(&mut *value))
    })
}

/// [`with_locked`], returning `None` instead of panicking if the value is already borrowed.
pub fn try_with_locked<T, R, F>(mutex: &Mutex<RefCell<T>>, f: F) -> Option<R>
where
    F: FnOnce(InOut<'_, T>) -> R,
{
    critical_section::with(|cs| {
        let mut value = mutex.borrow(cs).try_borrow_mut().ok()?;
        Some(f(InOut::new(&mut *value)))
    })
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use critical_section::Mutex;

    use super::{try_with_locked, with_locked};
    use crate::InOut;

    #[test]
    fn test_write_then_read() {
        let mutex = Mutex::new(RefCell::new(12));

        with_locked(&mutex, |mut value| *value = 42);

        assert_eq!(with_locked(&mutex, |value| *value), 42);
    }

    #[test]
    fn test_take_then_take() {
        let mutex = Mutex::new(RefCell::new(42));

        assert_eq!(with_locked(&mutex, |mut value| InOut::take(&mut value)), 42);
        assert_eq!(with_locked(&mutex, |mut value| InOut::take(&mut value)), 0);
    }

    #[test]
    fn test_try_when_free() {
        let mutex = Mutex::new(RefCell::new(Some(42)));

        assert_eq!(try_with_locked(&mutex, |mut value| value.take()), Some(Some(42)));
        assert_eq!(try_with_locked(&mutex, |value| value.is_none()), Some(true));
    }

    #[test]
    fn test_try_when_borrowed() {
        let mutex = Mutex::new(RefCell::new(0));

        let nested = with_locked(&mutex, |mut outer| {
            *outer = 1;
            try_with_locked(&mutex, |mut inner| *inner = 2)
        });

        assert_eq!(nested, None);
        assert_eq!(with_locked(&mutex, |value| *value), 1);
    }
}
