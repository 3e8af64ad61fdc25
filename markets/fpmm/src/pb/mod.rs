pub mod fpmm {
    pub mod types {
        pub mod v1 {
            include!("../generated/fpmm.types.v1.rs");
        }
    }
}
