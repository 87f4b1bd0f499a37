use std::{marker::PhantomData, ops};

/// セグメント木に載せる二項演算
///
/// * 結合則 `op(op(a, b), c) == op(a, op(b, c))` を満たす必要がある。
/// * `ident()` は単位元である必要がある。
///
/// 交換則は要求しない。`op(a, b)` の `a` が常に左側の区間に対応する。
pub trait Operator {
    type Query;
    fn ident(&self) -> Self::Query;
    fn op(&self, a: &Self::Query, b: &Self::Query) -> Self::Query;
}

impl<OP: Operator> Operator for &OP {
    type Query = OP::Query;

    fn ident(&self) -> Self::Query {
        (*self).ident()
    }

    fn op(&self, a: &Self::Query, b: &Self::Query) -> Self::Query {
        (*self).op(a, b)
    }
}

/// 交換則を満たす二項演算
pub trait Commutative: Operator {}

/// 遅延伝搬に用いる作用素
///
/// `resolve(l, r, &resolve(l, r, x, f), g) == resolve(l, r, x, &merge_modifier(f, g))`
/// を満たす必要がある。(`f`を作用させた後に`g`を作用させる)
pub trait LazyOperator: Operator {
    type Modifier;
    fn ident_modifier(&self) -> Self::Modifier;
    fn merge_modifier(&self, first: &Self::Modifier, then: &Self::Modifier) -> Self::Modifier;
    /// 区間`[l, r)`を代表する値`value`に`modifier`を作用させた値を返す。
    fn resolve(
        &self,
        l: usize,
        r: usize,
        value: &Self::Query,
        modifier: &Self::Modifier,
    ) -> Self::Query;
}

pub trait Num:
    Sized
    + Clone
    + Ord
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Rem<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;
    /// 区間の幅を値に変換する。収まらないときはpanicする。
    fn from_usize(n: usize) -> Self;
    fn abs(self) -> Self;
}

macro_rules! impl_num_signed {
    ($($t:ty),*) => {
        $(
            impl Num for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
                fn from_usize(n: usize) -> Self {
                    <$t>::try_from(n).unwrap_or_else(|_| {
                        panic!("{n} does not fit in {}", stringify!($t))
                    })
                }
                fn abs(self) -> Self {
                    <$t>::abs(self)
                }
            }
        )*
    };
}

macro_rules! impl_num_unsigned {
    ($($t:ty),*) => {
        $(
            impl Num for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
                fn from_usize(n: usize) -> Self {
                    <$t>::try_from(n).unwrap_or_else(|_| {
                        panic!("{n} does not fit in {}", stringify!($t))
                    })
                }
                fn abs(self) -> Self {
                    self
                }
            }
        )*
    };
}

impl_num_signed!(i8, i16, i32, i64, i128, isize);
impl_num_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! marker_op {
    ($($name:ident => $ctor:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name<T>(PhantomData<fn() -> T>);

            impl<T> $name<T> {
                pub const fn new() -> Self {
                    Self(PhantomData)
                }
            }

            impl<T> Default for $name<T> {
                fn default() -> Self {
                    Self::new()
                }
            }

            pub const fn $ctor<T>() -> $name<T> {
                $name::new()
            }
        )*
    };
}

marker_op! {
    Add => add,
    Mul => mul,
    Max => max,
    Min => min,
    Gcd => gcd,
}

impl<T: Num> Operator for Add<T> {
    type Query = T;
    fn ident(&self) -> T {
        T::ZERO
    }
    fn op(&self, a: &T, b: &T) -> T {
        a.clone() + b.clone()
    }
}

impl<T: Num> Commutative for Add<T> {}

impl<T: Num> Operator for Mul<T> {
    type Query = T;
    fn ident(&self) -> T {
        T::ONE
    }
    fn op(&self, a: &T, b: &T) -> T {
        a.clone() * b.clone()
    }
}

impl<T: Num> Commutative for Mul<T> {}

impl<T: Num> Operator for Max<T> {
    type Query = T;
    fn ident(&self) -> T {
        T::MIN
    }
    fn op(&self, a: &T, b: &T) -> T {
        if a > b {
            a.clone()
        } else {
            b.clone()
        }
    }
}

impl<T: Num> Commutative for Max<T> {}

impl<T: Num> Operator for Min<T> {
    type Query = T;
    fn ident(&self) -> T {
        T::MAX
    }
    fn op(&self, a: &T, b: &T) -> T {
        if a < b {
            a.clone()
        } else {
            b.clone()
        }
    }
}

impl<T: Num> Commutative for Min<T> {}

/// 絶対値のgcd。`0`を単位元とする。
impl<T: Num> Operator for Gcd<T> {
    type Query = T;
    fn ident(&self) -> T {
        T::ZERO
    }
    fn op(&self, a: &T, b: &T) -> T {
        let mut a = a.clone().abs();
        let mut b = b.clone().abs();
        while b != T::ZERO {
            let r = a % b.clone();
            a = b;
            b = r;
        }
        a
    }
}

impl<T: Num> Commutative for Gcd<T> {}

/// 単位元とクロージャから作る演算。交換則は仮定しない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FnOp<T, F> {
    ident: T,
    op: F,
}

impl<T: Clone, F: Fn(&T, &T) -> T> FnOp<T, F> {
    pub fn new(ident: T, op: F) -> Self {
        Self { ident, op }
    }
}

impl<T: Clone, F: Fn(&T, &T) -> T> Operator for FnOp<T, F> {
    type Query = T;
    fn ident(&self) -> T {
        self.ident.clone()
    }
    fn op(&self, a: &T, b: &T) -> T {
        (self.op)(a, b)
    }
}

/// 交換則を満たすと仮定して扱うラッパー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct AssumeCommutative<OP>(pub OP);

impl<OP: Operator> Operator for AssumeCommutative<OP> {
    type Query = OP::Query;
    fn ident(&self) -> Self::Query {
        self.0.ident()
    }
    fn op(&self, a: &Self::Query, b: &Self::Query) -> Self::Query {
        self.0.op(a, b)
    }
}

impl<OP: Operator> Commutative for AssumeCommutative<OP> {}

marker_op! {
    RangeAddSum => range_add_sum,
    RangeAddMin => range_add_min,
    RangeAddMax => range_add_max,
    RangeAssignSum => range_assign_sum,
}

impl<T: Num> Operator for RangeAddSum<T> {
    type Query = T;
    fn ident(&self) -> T {
        T::ZERO
    }
    fn op(&self, a: &T, b: &T) -> T {
        a.clone() + b.clone()
    }
}

impl<T: Num> Commutative for RangeAddSum<T> {}

impl<T: Num> LazyOperator for RangeAddSum<T> {
    type Modifier = T;
    fn ident_modifier(&self) -> T {
        T::ZERO
    }
    fn merge_modifier(&self, first: &T, then: &T) -> T {
        first.clone() + then.clone()
    }
    fn resolve(&self, l: usize, r: usize, value: &T, modifier: &T) -> T {
        value.clone() + T::from_usize(r - l) * modifier.clone()
    }
}

/// 空区間を`None`で表す二項演算。値が両方あるときだけ`f`を使う。
fn or_combine<T: Clone>(a: &Option<T>, b: &Option<T>, f: impl FnOnce(&T, &T) -> T) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) => Some(f(x, y)),
        (Some(_), None) => a.clone(),
        (None, _) => b.clone(),
    }
}

/// 区間加算・区間最小値。空区間の値は`None`で、どの要素の値とも区別される。
impl<T: Num> Operator for RangeAddMin<T> {
    type Query = Option<T>;
    fn ident(&self) -> Option<T> {
        None
    }
    fn op(&self, a: &Option<T>, b: &Option<T>) -> Option<T> {
        or_combine(a, b, |x, y| Min::<T>::new().op(x, y))
    }
}

impl<T: Num> Commutative for RangeAddMin<T> {}

impl<T: Num> LazyOperator for RangeAddMin<T> {
    type Modifier = T;
    fn ident_modifier(&self) -> T {
        T::ZERO
    }
    fn merge_modifier(&self, first: &T, then: &T) -> T {
        first.clone() + then.clone()
    }
    fn resolve(&self, _: usize, _: usize, value: &Option<T>, modifier: &T) -> Option<T> {
        value.clone().map(|x| x + modifier.clone())
    }
}

/// 区間加算・区間最大値。空区間の値は`None`。
impl<T: Num> Operator for RangeAddMax<T> {
    type Query = Option<T>;
    fn ident(&self) -> Option<T> {
        None
    }
    fn op(&self, a: &Option<T>, b: &Option<T>) -> Option<T> {
        or_combine(a, b, |x, y| Max::<T>::new().op(x, y))
    }
}

impl<T: Num> Commutative for RangeAddMax<T> {}

impl<T: Num> LazyOperator for RangeAddMax<T> {
    type Modifier = T;
    fn ident_modifier(&self) -> T {
        T::ZERO
    }
    fn merge_modifier(&self, first: &T, then: &T) -> T {
        first.clone() + then.clone()
    }
    fn resolve(&self, _: usize, _: usize, value: &Option<T>, modifier: &T) -> Option<T> {
        value.clone().map(|x| x + modifier.clone())
    }
}

impl<T: Num> Operator for RangeAssignSum<T> {
    type Query = T;
    fn ident(&self) -> T {
        T::ZERO
    }
    fn op(&self, a: &T, b: &T) -> T {
        a.clone() + b.clone()
    }
}

impl<T: Num> Commutative for RangeAssignSum<T> {}

/// `None`は何もしない作用素。後から作用させた代入が優先される。
impl<T: Num> LazyOperator for RangeAssignSum<T> {
    type Modifier = Option<T>;
    fn ident_modifier(&self) -> Option<T> {
        None
    }
    fn merge_modifier(&self, first: &Option<T>, then: &Option<T>) -> Option<T> {
        then.clone().or_else(|| first.clone())
    }
    fn resolve(&self, l: usize, r: usize, value: &T, modifier: &Option<T>) -> T {
        match modifier {
            Some(x) => T::from_usize(r - l) * x.clone(),
            None => value.clone(),
        }
    }
}
