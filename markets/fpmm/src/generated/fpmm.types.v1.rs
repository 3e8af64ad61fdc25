// @generated
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Events {
    #[prost(message, repeated, tag="1")]
    pub pool_events: ::prost::alloc::vec::Vec<PoolEvent>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PoolEvent {
    #[prost(bytes="vec", tag="1")]
    pub pool_address: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag="2")]
    pub timestamp: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(uint64, tag="3")]
    pub block_number: u64,
    #[prost(bytes="vec", tag="4")]
    pub transaction_hash: ::prost::alloc::vec::Vec<u8>,
    #[prost(oneof="pool_event::Type", tags="10, 11, 12, 13, 14")]
    pub r#type: ::core::option::Option<pool_event::Type>,
}
/// Nested message and enum types in `PoolEvent`.
pub mod pool_event {
    #[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Type {
        #[prost(message, tag="10")]
        FundingAdded(super::FundingAdded),
        #[prost(message, tag="11")]
        FundingRemoved(super::FundingRemoved),
        #[prost(message, tag="12")]
        Buy(super::Buy),
        #[prost(message, tag="13")]
        Sell(super::Sell),
        #[prost(message, tag="14")]
        Transfer(super::Transfer),
    }
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FundingAdded {
    #[prost(bytes="vec", tag="1")]
    pub funder: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, repeated, tag="2")]
    pub amounts_added: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag="3")]
    pub shares_minted: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FundingRemoved {
    #[prost(bytes="vec", tag="1")]
    pub funder: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, repeated, tag="2")]
    pub amounts_removed: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag="3")]
    pub collateral_removed_from_fee_pool: ::prost::alloc::string::String,
    #[prost(string, tag="4")]
    pub shares_burnt: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Buy {
    #[prost(bytes="vec", tag="1")]
    pub buyer: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag="2")]
    pub investment_amount: ::prost::alloc::string::String,
    #[prost(string, tag="3")]
    pub fee_amount: ::prost::alloc::string::String,
    #[prost(uint64, tag="4")]
    pub outcome_index: u64,
    #[prost(string, tag="5")]
    pub outcome_tokens_bought: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Sell {
    #[prost(bytes="vec", tag="1")]
    pub seller: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag="2")]
    pub return_amount: ::prost::alloc::string::String,
    #[prost(string, tag="3")]
    pub fee_amount: ::prost::alloc::string::String,
    #[prost(uint64, tag="4")]
    pub outcome_index: u64,
    #[prost(string, tag="5")]
    pub outcome_tokens_sold: ::prost::alloc::string::String,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transfer {
    #[prost(bytes="vec", tag="1")]
    pub from: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes="vec", tag="2")]
    pub to: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag="3")]
    pub value: ::prost::alloc::string::String,
}
// @@protoc_insertion_point(module)
