//! Reserved words.
//!
//! Words that double as operators (`AND`, `LIKE`, `BETWEEN`, ...) live in the
//! operator table instead since the lexer matches operators first.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Try to get a keyword from a string, ignoring string casing.
pub fn keyword_from_str(s: &str) -> Option<Keyword> {
    KEYWORD_LOOKUP.get(s.to_ascii_uppercase().as_str()).copied()
}

static KEYWORD_LOOKUP: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
    KEYWORD_STRINGS
        .iter()
        .copied()
        .zip(ALL_KEYWORDS.iter().copied())
        .collect()
});

/// Generate an enum of keywords.
macro_rules! define_keywords {
    ($($ident:ident),* $(,)?) => {
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($ident),*
        }

        pub const ALL_KEYWORDS: &[Keyword] = &[
            $(Keyword::$ident),*
        ];

        pub const KEYWORD_STRINGS: &[&str] = &[
            $(stringify!($ident)),*
        ];

        impl Keyword {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$ident => stringify!($ident)),*
                }
            }
        }
    };
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[rustfmt::skip]
define_keywords!(
    ACCESSIBLE, ADD, ALL, ALTER, ANALYZE, AS, ASC, ASENSITIVE, BEFORE, BIGINT,
    BLOB, BOTH, BY, CALL, CASCADE, CHANGE, CHAR, CHARACTER, CHECK, COLUMN,
    CONDITION, CONSTRAINT, CONTINUE, CONVERT, CREATE, CROSS, CURRENT_DATE,
    CURRENT_TIME, CURRENT_TIMESTAMP, CURRENT_USER, CURSOR, DATABASE, DATABASES,
    DAY_HOUR, DAY_MICROSECOND, DAY_MINUTE, DAY_SECOND, DEC, DECIMAL, DECLARE,
    DEFAULT, DELAYED, DELETE, DESC, DESCRIBE, DETERMINISTIC, DISTINCT, DISTINCTROW,
    DOUBLE, DROP, DUAL, EACH, ELSEIF, ENCLOSED, ESCAPED, EXISTS, EXIT, EXPLAIN,
    FALSE, FETCH, FLOAT, FLOAT4, FLOAT8, FOR, FORCE, FOREIGN, FROM, FULLTEXT,
    GENERAL, GRANT, GROUP, HAVING, HIGH_PRIORITY, HOUR_MICROSECOND, HOUR_MINUTE,
    HOUR_SECOND, IF, IGNORE, IGNORE_SERVER_IDS, INDEX, INFILE, INNER, INOUT,
    INSENSITIVE, INSERT, INT, INT1, INT2, INT3, INT4, INT8, INTEGER, INTO, ITERATE,
    JOIN, KEY, KEYS, KILL, LEADING, LEAVE, LEFT, LIMIT, LINEAR, LINES, LOAD,
    LOCALTIME, LOCALTIMESTAMP, LOCK, LONG, LONGBLOB, LONGTEXT, LOOP, LOW_PRIORITY,
    MASTER_HEARTBEAT_PERIOD, MASTER_SSL_VERIFY_SERVER_CERT, MATCH, MAXVALUE,
    MEDIUMBLOB, MEDIUMINT, MEDIUMTEXT, MIDDLEINT, MINUTE_MICROSECOND,
    MINUTE_SECOND, MODIFIES, NATURAL, NO_WRITE_TO_BINLOG, NULL, NUMERIC, ON,
    OPTIMIZE, OPTION, OPTIONALLY, ORDER, OUT, OUTER, OUTFILE, PRECISION, PRIMARY,
    PROCEDURE, PURGE, RANGE, READ, READS, READ_WRITE, REAL, REFERENCES, RELEASE,
    RENAME, REPEAT, REPLACE, REQUIRE, RESIGNAL, RESTRICT, RETURN, REVOKE, RIGHT,
    RLIKE, SCHEMA, SCHEMAS, SECOND_MICROSECOND, SELECT, SENSITIVE, SEPARATOR, SET,
    SHOW, SIGNAL, SLOW, SMALLINT, SPATIAL, SPECIFIC, SQL, SQLEXCEPTION, SQLSTATE,
    SQLWARNING, SQL_BIG_RESULT, SQL_CALC_FOUND_ROWS, SQL_SMALL_RESULT, SSL,
    STARTING, STRAIGHT_JOIN, TABLE, TERMINATED, TINYBLOB, TINYINT, TINYTEXT, TO,
    TRAILING, TRIGGER, TRUE, UNDO, UNION, UNIQUE, UNLOCK, UNSIGNED, UPDATE, USAGE,
    USE, USING, UTC_DATE, UTC_TIME, UTC_TIMESTAMP, VALUES, VARBINARY, VARCHAR,
    VARCHARACTER, VARYING, WHERE, WHILE, WITH, WRITE, YEAR_MONTH, ZEROFILL
);
