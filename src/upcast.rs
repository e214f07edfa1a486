use core::any::Any;
use core::fmt::Debug;

/// `Self` can be viewed as a `U` without becoming a different object.
///
/// This is the relation [`InOut::upcast`](crate::InOut::upcast) converts along, standing in for
/// subtyping between the element types. `upcast_mut` must return `self` itself, possibly with a
/// wider type; debug builds check that the data address is unchanged.
///
/// Implement it for your own trait objects with [`impl_upcast!`](crate::impl_upcast).
pub trait Upcast<U: ?Sized> {
    fn upcast_mut(&mut self) -> &mut U;
}

impl<T, const N: usize> Upcast<[T]> for [T; N] {
    fn upcast_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Any> Upcast<dyn Any> for T {
    fn upcast_mut(&mut self) -> &mut (dyn Any + 'static) {
        self
    }
}

impl<'t, T: Debug + 't> Upcast<dyn Debug + 't> for T {
    fn upcast_mut(&mut self) -> &mut (dyn Debug + 't) {
        self
    }
}

/// Implements [`Upcast`] from each listed type to `dyn Trait`.
///
/// ```
/// use inout_ref::{impl_upcast, inout, InOut};
///
/// trait Shape {
///     fn grow(&mut self, by: f32);
/// }
///
/// struct Circle {
///     radius: f32,
/// }
///
/// impl Shape for Circle {
///     fn grow(&mut self, by: f32) {
///         self.radius += by;
///     }
/// }
///
/// impl_upcast!(dyn Shape => Circle);
///
/// fn grow_all(mut shape: InOut<'_, dyn Shape>) {
///     shape.grow(1.0);
/// }
///
/// let mut circle = Circle { radius: 1.0 };
/// grow_all(InOut::upcast(inout(&mut circle)));
/// assert_eq!(circle.radius, 2.0);
/// ```
#[macro_export]
macro_rules! impl_upcast {
    (dyn $target:path => $($source:ty),+ $(,)?) => {
        $(
            impl $crate::Upcast<dyn $target + 'static> for $source {
                fn upcast_mut(&mut self) -> &mut (dyn $target + 'static) {
                    self
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use core::any::Any;
    use core::fmt::Debug;

    use super::Upcast;
    use crate::inout::address;

    trait Counter {
        fn increment(&mut self);

        fn count(&self) -> u32;
    }

    #[derive(Debug, Default)]
    struct Clicks(u32);

    impl Counter for Clicks {
        fn increment(&mut self) {
            self.0 += 1;
        }

        fn count(&self) -> u32 {
            self.0
        }
    }

    crate::impl_upcast!(dyn Counter => Clicks);

    #[test]
    fn test_array_to_slice() {
        let mut array = [1u8, 2, 3];
        let array_address = address(&array);

        let slice = <[u8; 3] as Upcast<[u8]>>::upcast_mut(&mut array);

        assert_eq!(slice.len(), 3);
        assert!(core::ptr::eq(address(slice), array_address));
    }

    #[test]
    fn test_to_any() {
        let mut value = 7u16;
        let value_address = address(&value);

        let any = <u16 as Upcast<dyn Any>>::upcast_mut(&mut value);

        assert!(core::ptr::eq(address(any), value_address));
        assert_eq!(any.downcast_ref::<u16>(), Some(&7));
    }

    #[test]
    fn test_to_debug_with_borrowed_data() {
        let text = [b'a', b'b'];
        let mut borrowed = &text[..];

        let debug = <&[u8] as Upcast<dyn Debug + '_>>::upcast_mut(&mut borrowed);

        assert!(core::ptr::eq(address(debug), address(&borrowed)));
    }

    #[test]
    fn test_macro_impl() {
        let mut clicks = Clicks::default();

        {
            let counter = <Clicks as Upcast<dyn Counter>>::upcast_mut(&mut clicks);
            counter.increment();
            counter.increment();
            assert_eq!(counter.count(), 2);
        }

        assert_eq!(clicks.0, 2);
    }
}
