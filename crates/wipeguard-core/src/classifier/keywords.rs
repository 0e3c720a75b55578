//! Built-in keyword and extension tables.
//!
//! Keywords are matched as lower-case substrings of the file name, so short entries such as
//! `pin` or `irs` also fire inside longer words.

pub const CRITICAL_KEYWORDS: &[&str] = &[
    "ssn",
    "social security number",
    "social security",
    "ein",
    "tax id",
    "taxpayer id",
    "bank account",
    "routing number",
    "credit card",
    "debit card",
    "cvv",
    "cvc",
    "passport",
    "driver license",
    "driver licence",
    "national id",
    "identity card",
    "birth certificate",
    "death certificate",
    "marriage certificate",
    "medical record",
    "patient record",
    "health record",
    "hospital record",
    "prescription",
    "diagnosis",
    "treatment",
    "hipaa",
    "phi",
    "salary",
    "payroll",
    "w2",
    "w-2",
    "1099",
    "tax return",
    "irs",
    "classified",
    "top secret",
    "confidential",
    "proprietary",
    "trade secret",
    "api key",
    "private key",
    "secret key",
    "auth token",
    "access token",
    "password",
    "passwd",
    "pwd",
    "pin",
    "security code",
];

pub const HIGH_RISK_KEYWORDS: &[&str] = &[
    "ssn",
    "social security",
    "bank account",
    "credit card",
    "passport",
    "driver license",
    "medical record",
    "tax return",
    "classified",
    "top secret",
    "api key",
    "private key",
    "password",
    "secret",
    "confidential",
    "proprietary",
    "national id",
    "birth certificate",
];

pub const MEDIUM_RISK_KEYWORDS: &[&str] = &[
    "personal",
    "private",
    "internal",
    "restricted",
    "sensitive",
    "confidential",
    "employee",
    "salary",
    "payroll",
    "financial",
    "insurance",
    "legal",
    "contract",
    "agreement",
    "license",
    "certificate",
    "token",
    "auth",
    "login",
    "signin",
    "account",
    "profile",
    "identity",
    "address",
    "phone",
    "email",
    "contact",
    "emergency",
    "family",
    "relationship",
];

/// Key material, certificates and encrypted containers.
pub const HIGH_RISK_EXTENSIONS: &[&str] = &[
    "p12", "pfx", "pem", "key", "crt", "cer", "der", "jks", "keystore", "wallet", "kdb", "kdbx",
    "asc", "gpg", "pgp", "enc",
];

/// Document and data formats that may hold sensitive content.
pub const MEDIUM_RISK_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf", "csv", "json", "xml", "sql",
    "db", "sqlite", "mdb", "accdb",
];

/// Documents above this size are elevated to medium when they carry a medium keyword.
pub const LARGE_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

pub(crate) fn find_keyword<'a>(name: &str, table: &[&'a str]) -> Option<&'a str> {
    table.iter().copied().find(|keyword| name.contains(keyword))
}
