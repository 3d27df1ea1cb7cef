use std::sync::LazyLock;

use regex::Regex;

/// A known license text, recognized by distinguishing phrases.
pub struct Signature {
    pub id: &'static str,
    pub pattern: Regex,
}

/// Signature sources in match order. Texts that embed another license's
/// phrasing come first (AGPL/LGPL before GPL, BSD-4 before BSD-3 before BSD-2).
///
/// Patterns run against text whose whitespace has been collapsed to single
/// spaces and whose quotes have been folded to ASCII.
const TABLE: &[(&str, &str)] = &[
    ("Apache-2.0", r"(?i)apache license,? version 2\.0"),
    ("AGPL-3.0", r"(?i)gnu affero general public license version 3"),
    ("LGPL-3.0", r"(?i)gnu lesser general public license version 3"),
    ("LGPL-2.1", r"(?i)gnu lesser general public license version 2\.1"),
    ("GPL-3.0", r"(?i)gnu general public license version 3"),
    ("GPL-2.0", r"(?i)gnu general public license version 2"),
    ("MPL-2.0", r"(?i)mozilla public license,? (?:version|v\.?) ?2\.0"),
    ("EPL-2.0", r"(?i)eclipse public license - v(?:ersion)? ?2\.0"),
    ("CC0-1.0", r"(?i)cc0 1\.0 universal"),
    ("CC-BY-4.0", r"(?i)creative commons attribution 4\.0 international public license"),
    ("CC-BY-3.0", r"(?i)creative commons (?:legal code )?attribution 3\.0 unported"),
    (
        "Unlicense",
        r"(?i)this is free and unencumbered software released into the public domain",
    ),
    (
        "BSD-4-Clause",
        r"(?i)redistribution and use in source and binary forms.*all advertising materials mentioning features or use of this software must display",
    ),
    (
        "BSD-3-Clause",
        r"(?i)redistribution and use in source and binary forms.*materials provided with the distribution\.? (?:\S+ )?neither the name of",
    ),
    (
        "BSD-2-Clause",
        r"(?i)redistribution and use in source and binary forms.*materials provided with the distribution\.? this software is provided",
    ),
    (
        "MIT",
        r"(?i)permission is hereby granted, free of charge, to any person obtaining a copy.*the above copyright notice and this permission notice shall be included",
    ),
    (
        "ISC",
        r"(?i)permission to use, copy, modify, and(?:/or)? distribute this software for any purpose with or without fee is hereby granted, provided that the above copyright notice",
    ),
    (
        "0BSD",
        r"(?i)permission to use, copy, modify, and(?:/or)? distribute this software for any purpose with or without fee is hereby granted\. the software is provided",
    ),
    (
        "Zlib",
        r"(?i)permission is granted to anyone to use this software for any purpose, including commercial applications.*altered source versions must be plainly marked",
    ),
    ("WTFPL", r"(?i)do what the fuck you want to public license"),
    ("Artistic-2.0", r"(?i)the artistic license 2\.0"),
    ("BlueOak-1.0.0", r"(?i)blue oak model license"),
];

pub static SIGNATURES: LazyLock<Vec<Signature>> = LazyLock::new(|| {
    TABLE
        .iter()
        .map(|&(id, pattern)| Signature {
            id,
            pattern: Regex::new(pattern).expect("valid signature pattern"),
        })
        .collect()
});

/// Collapse whitespace runs and fold typographic quotes so wrapped license
/// files match the single-line signatures.
pub fn canonical_text(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First signature matching `text`, in table order.
pub fn identify(text: &str) -> Option<&'static str> {
    let canonical = canonical_text(text);
    SIGNATURES
        .iter()
        .find(|sig| sig.pattern.is_match(&canonical))
        .map(|sig| sig.id)
}
