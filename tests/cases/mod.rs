// Helper macro to check a result against either a pattern or an expected value
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Some($($pattern:tt)*) }) => {
        match $result {
            Some($($pattern)*) => {},
            other => panic!("Expected Some({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { None }) => {
        match $result {
            None => {},
            other => panic!("Expected None but got {:#?}", other),
        }
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        match $result {
            actual => {
                pretty_assertions::assert_eq!($expected, actual, "Expected {:#?} but got {:#?}\n\n< expected / got >", $expected, actual);
            }
        }
    };
}

// Collects every element of a sequence, failing the test on the first error
#[macro_export]
macro_rules! collect_ok {
    ($seq:expr) => {
        $seq.iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|err| panic!("Expected a clean pass but got {}", err))
    };
}
