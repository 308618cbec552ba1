//! Bundled sample input for `oxide-bind example`.
//!
//! The log uses Hibernate's own 1-based numbering inside JSON log
//! envelopes, with some unrelated lines mixed in.

pub const EXAMPLE_SQL: &str = r#"select
    o1_0."order_id",
    o1_0."customer_name",
    o1_0."status",
    o1_0."created_at"
from "SHOP"."orders" o1_0
join "SHOP"."customers" c1_0 on c1_0."customer_id"=o1_0."customer_id"
where
    (?=1 or lower(o1_0."customer_name") like ('%'||?||'%'))
    and c1_0."region_code"=?
    and (?=1 or o1_0."status" in (?))
    and o1_0."total">=?
    and o1_0."note"!='n/a?'
order by o1_0."created_at" desc offset ? rows fetch first ? rows only"#;

pub const EXAMPLE_LOG: &str = r#"{"level":"DEBUG","message":"select o1_0.order_id, ... fetch first ? rows only"}
{"level":"TRACE","message":"binding parameter [1] as [BOOLEAN] - [false]"}
{"level":"TRACE","message":"binding parameter [2] as [VARCHAR] - [smith]"}
{"level":"TRACE","message":"binding parameter [3] as [VARCHAR] - [EU_WEST]"}
{"level":"TRACE","message":"binding parameter [4] as [BOOLEAN] - [false]"}
{"level":"TRACE","message":"binding parameter [5] as [VARCHAR] - [SHIPPED,DELIVERED]"}
{"level":"TRACE","message":"binding parameter [6] as [DECIMAL] - [100.00]"}
{"level":"TRACE","message":"binding parameter [7] as [INTEGER] - [0]"}
{"level":"TRACE","message":"binding parameter [8] as [INTEGER] - [50]"}
{"level":"TRACE","message":"extracted value ([1] : [BIGINT]) - [1001]"}"#;
