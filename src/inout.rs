use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;

use crate::upcast::Upcast;

/// `&mut T` that says so at the call site.
///
/// A function taking `InOut<'_, T>` reads and writes the caller's value, and the caller has to
/// write `inout(&mut x)` to call it. The handle always refers to a live object: there is no empty
/// state and no way to build one from a raw pointer, so code receiving it never checks.
///
/// The operations that are not part of the referent's own surface are associated functions
/// (`InOut::upcast(w)`, `InOut::rebind(&mut w, other)`, ...) so that they never shadow a method of
/// `T` reached through [`Deref`].
///
/// ```
/// use inout_ref::{inout, InOut};
///
/// fn double(mut value: InOut<'_, i32>) {
///     *value *= 2;
/// }
///
/// let mut x = 21;
/// double(inout(&mut x));
/// assert_eq!(x, 42);
/// ```
///
/// There is no default handle:
///
/// ```compile_fail
/// let handle: inout_ref::InOut<'static, i32> = Default::default();
/// ```
///
/// Nor one built from a raw pointer:
///
/// ```compile_fail
/// let mut x = 5;
/// let pointer: *mut i32 = &mut x;
/// let handle = inout_ref::InOut::new(pointer);
/// ```
///
/// Nor from an optional reference:
///
/// ```compile_fail
/// let maybe: Option<&mut i32> = None;
/// let handle: inout_ref::InOut<'_, i32> = inout_ref::InOut::new(maybe);
/// ```
///
/// The handle is an exclusive borrow, so it is moved rather than copied:
///
/// ```compile_fail
/// let mut x = 5;
/// let handle = inout_ref::inout(&mut x);
/// let first = handle;
/// let second = handle;
/// ```
#[repr(transparent)]
pub struct InOut<'a, T: ?Sized>(&'a mut T);

/// Wraps `reference`, inferring `T` from it.
///
/// `scale(inout(&mut x), 2)` instead of `scale(InOut::<Vec3>::new(&mut x), 2)`.
pub fn inout<T: ?Sized>(reference: &mut T) -> InOut<'_, T> {
    debug_assert!(!address(reference).is_null());
    InOut::new(reference)
}

impl<'a, T: ?Sized> InOut<'a, T> {
    pub fn new(reference: &'a mut T) -> Self {
        Self(reference)
    }

    /// Gives up the handle, returning the borrow it was made from.
    pub fn into_mut(this: Self) -> &'a mut T {
        this.0
    }

    /// Lends the handle to a callee for a shorter borrow, keeping it usable afterwards.
    pub fn reborrow<'b>(this: &'b mut Self) -> InOut<'b, T> {
        InOut(&mut *this.0)
    }

    /// Address of the referent, for code that needs the pointer itself.
    ///
    /// Field and method access go through [`Deref`]; `handle.field` reads `referent.field`.
    pub fn as_ptr(this: &Self) -> *const T {
        &*this.0
    }

    /// Mutable address of the referent.
    pub fn as_mut_ptr(this: &mut Self) -> *mut T {
        &mut *this.0
    }

    pub fn as_non_null(this: &mut Self) -> NonNull<T> {
        NonNull::from(&mut *this.0)
    }

    /// Always `true`.
    ///
    /// Kept for call sites written against nullable handles. A handle cannot be invalid, so this
    /// carries no information.
    pub const fn is_valid(_this: &Self) -> bool {
        true
    }

    /// Whether both handles refer to the same object.
    ///
    /// Only the data address is compared, so a handle and its upcast compare equal.
    pub fn ptr_eq<U: ?Sized>(this: &Self, other: &InOut<'_, U>) -> bool {
        core::ptr::eq(address(&*this.0), address(&*other.0))
    }

    /// Converts to a handle of a compatible type that refers to the same object.
    ///
    /// ```
    /// use core::any::Any;
    /// use inout_ref::{inout, InOut};
    ///
    /// fn reset(mut value: InOut<'_, dyn Any>) {
    ///     if let Some(number) = value.downcast_mut::<i32>() {
    ///         *number = 0;
    ///     }
    /// }
    ///
    /// let mut x = 5;
    /// reset(InOut::upcast(inout(&mut x)));
    /// assert_eq!(x, 0);
    /// ```
    ///
    /// # Panics
    ///
    /// In debug builds, if the [`Upcast`] impl returns a reference to a different object.
    pub fn upcast<U: ?Sized>(this: Self) -> InOut<'a, U>
    where
        T: Upcast<U>,
    {
        let source = address(&*this.0);
        let target = <T as Upcast<U>>::upcast_mut(this.0);
        debug_assert!(
            core::ptr::eq(source, address(&*target)),
            "upcast changed the referenced object"
        );
        InOut(target)
    }

    /// Like [`InOut::upcast`], with the conversion given at the call site.
    ///
    /// Meant for unsizing coercions that have no [`Upcast`] impl:
    /// `InOut::coerce(handle, |shape| shape as &mut dyn Shape)`.
    ///
    /// # Panics
    ///
    /// In debug builds, if `f` returns a reference to a different object.
    pub fn coerce<U: ?Sized, F>(this: Self, f: F) -> InOut<'a, U>
    where
        F: FnOnce(&'a mut T) -> &'a mut U,
    {
        let source = address(&*this.0);
        let target = f(this.0);
        debug_assert!(
            core::ptr::eq(source, address(&*target)),
            "coerce changed the referenced object"
        );
        InOut(target)
    }

    /// Narrows the handle to a part of the referent, such as a field.
    pub fn map<U: ?Sized, F>(this: Self, f: F) -> InOut<'a, U>
    where
        F: FnOnce(&'a mut T) -> &'a mut U,
    {
        InOut(f(this.0))
    }

    /// Makes the handle refer to another object, returning the previous handle.
    pub fn rebind(this: &mut Self, other: InOut<'a, T>) -> InOut<'a, T> {
        core::mem::replace(this, other)
    }

    /// [`InOut::rebind`] from a handle of a compatible type.
    pub fn rebind_from<Y: ?Sized>(this: &mut Self, other: InOut<'a, Y>) -> InOut<'a, T>
    where
        Y: Upcast<T>,
    {
        Self::rebind(this, InOut::upcast(other))
    }
}

impl<'a, T> InOut<'a, T> {
    /// Stores `value` in the referent, returning the old value.
    pub fn replace(this: &mut Self, value: T) -> T {
        core::mem::replace(this.0, value)
    }
}

impl<'a, T: Default> InOut<'a, T> {
    /// Takes the referent's value, leaving Default::default() in its place.
    pub fn take(this: &mut Self) -> T {
        core::mem::take(this.0)
    }
}

pub(crate) fn address<T: ?Sized>(value: &T) -> *const () {
    (value as *const T).cast()
}

impl<'a, T: ?Sized> From<&'a mut T> for InOut<'a, T> {
    fn from(reference: &'a mut T) -> Self {
        Self(reference)
    }
}

impl<T: ?Sized> Deref for InOut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

impl<T: ?Sized> DerefMut for InOut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.0
    }
}

impl<T: ?Sized> AsRef<T> for InOut<'_, T> {
    fn as_ref(&self) -> &T {
        self.0
    }
}

impl<T: ?Sized> AsMut<T> for InOut<'_, T> {
    fn as_mut(&mut self) -> &mut T {
        self.0
    }
}

impl<T: ?Sized> Borrow<T> for InOut<'_, T> {
    fn borrow(&self) -> &T {
        self.0
    }
}

impl<T: ?Sized> BorrowMut<T> for InOut<'_, T> {
    fn borrow_mut(&mut self) -> &mut T {
        self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for InOut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for InOut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: ?Sized> fmt::Pointer for InOut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&Self::as_ptr(self), f)
    }
}

impl<'b, T, U> PartialEq<InOut<'b, U>> for InOut<'_, T>
where
    T: ?Sized + PartialEq<U>,
    U: ?Sized,
{
    fn eq(&self, other: &InOut<'b, U>) -> bool {
        **self == **other
    }
}

impl<T: ?Sized + Eq> Eq for InOut<'_, T> {}

impl<T: ?Sized + PartialOrd> PartialOrd for InOut<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: ?Sized + Ord> Ord for InOut<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: ?Sized + Hash> Hash for InOut<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state)
    }
}
