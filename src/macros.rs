#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

macro_rules! rule {
    (
        name: $name:expr,
        field: $field:expr,
        pattern: $pat:literal
        $(, buckets: $buckets:expr)?
        , confidence: $confidence:expr
        , extract: |$caps:ident| $body:block
        $(,)?
    ) => {{
        fn extract($caps: &regex::Captures<'_>) -> Option<$crate::Extracted> $body

        $crate::FieldRule {
            name: $name,
            field: $field,
            pattern: $crate::regex!($pat),
            extractor: extract,
            confidence: $confidence,
            buckets: { $crate::BucketMask::empty() $(| $buckets)? },
        }
    }};
}
