macro_rules! nutype_string {
    ($(#[$attr:meta])* $ident:ident($($args:tt)*)) => {
        $(#[$attr])*
        #[::nutype::nutype(
            $($args)*,
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                AsRef,
                Deref,
                TryFrom,
                Serialize,
                Deserialize
            )
        )]
        pub struct $ident(String);
    };
}

macro_rules! id {
    ($(#[$attr:meta])* $ident:ident($inner:ident)) => {
        $(#[$attr])*
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deref,
            From,
            Display,
            Serialize,
            Deserialize
        ))]
        pub struct $ident($inner);
    };
}

pub(crate) use id;
pub(crate) use nutype_string;
