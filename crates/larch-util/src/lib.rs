/// Dense u32-backed indices. Implemented by every type declared through
/// [`make_type_idx!`], which lets generic tables (interners, bit sets) hand
/// out typed ids.
pub trait TypeIdx: Copy + Eq + std::hash::Hash {
    fn from_index(index: usize) -> Self;
    fn to_index(self) -> usize;
}

// Declares a u32-backed index newtype. Element types listed after `=>` get
// `Index`/`IndexMut` impls for both `Vec<_>` and `[_]` so tables keyed by the
// index can be used without casting.
//
//     make_type_idx!(pub StateId => StateItems, Row);
#[macro_export]
macro_rules! make_type_idx {
    ($vis:vis $type_idx_name:ident $(=> $($type_name:ty),+ $(,)?)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $type_idx_name(u32);

        impl $type_idx_name {
            $vis fn new(index: usize) -> $type_idx_name {
                debug_assert!(index <= u32::MAX as usize, "index space exhausted");
                $type_idx_name(index as u32)
            }

            $vis fn index(self) -> usize {
                self.0 as usize
            }

            // TODO: consider newtyping Vec so that push hands back the index directly
            #[allow(dead_code)]
            $vis fn from_push<V>(vec: &mut Vec<V>, val: V) -> $type_idx_name {
                let idx = $type_idx_name::new(vec.len());
                vec.push(val);
                idx
            }
        }

        impl $crate::TypeIdx for $type_idx_name {
            fn from_index(index: usize) -> Self {
                $type_idx_name::new(index)
            }

            fn to_index(self) -> usize {
                self.index()
            }
        }

        impl std::fmt::Display for $type_idx_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        $($(
            impl std::ops::Index<$type_idx_name> for [$type_name] {
                type Output = $type_name;

                fn index(&self, index: $type_idx_name) -> &Self::Output {
                    &self[index.0 as usize]
                }
            }

            impl std::ops::IndexMut<$type_idx_name> for [$type_name] {
                fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                    &mut self[index.0 as usize]
                }
            }

            impl std::ops::Index<$type_idx_name> for Vec<$type_name> {
                type Output = $type_name;

                fn index(&self, index: $type_idx_name) -> &Self::Output {
                    &self.as_slice()[index]
                }
            }

            impl std::ops::IndexMut<$type_idx_name> for Vec<$type_name> {
                fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                    &mut self.as_mut_slice()[index]
                }
            }
        )+)?
    };
}
