/// Implements the standard arithmetic traits for transparent single-field newtypes.
///
/// `op!(binary Foo, Add, add)` implements `Add for Foo`, `op!(inplace Foo, SubAssign, sub_assign)` implements the
/// in-place variant, and `op!(unary Foo, Neg, neg)` implements the unary operator.
#[macro_export]
macro_rules! op {
    (binary $type:ty, $trait:ident, $method:ident) => {
        impl $trait for $type {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                Self(self.0.$method(rhs.0))
            }
        }
    };

    (inplace $type:ty, $trait:ident, $method:ident) => {
        impl $trait for $type {
            fn $method(&mut self, rhs: Self) {
                self.0.$method(rhs.0);
            }
        }
    };

    (unary $type:ty, $trait:ident, $method:ident) => {
        impl $trait for $type {
            type Output = Self;

            fn $method(self) -> Self::Output {
                Self(self.0.$method())
            }
        }
    };
}
