//! Default English inflection table.
//!
//! Rules are listed oldest first; the inflector tries them newest first, so
//! later entries override earlier, more general ones.

pub const PLURALS: &[(&str, &str)] = &[
    (r"(?i)$", "s"),
    (r"(?i)s$", "s"),
    (r"(?i)^(ax|test)is$", "${1}es"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)(octop|vir)i$", "${1}i"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(buffal|tomat)o$", "${1}oes"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)sis$", "ses"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)^(m|l)ouse$", "${1}ice"),
    (r"(?i)^(m|l)ice$", "${1}ice"),
    (r"(?i)^(ox)$", "${1}en"),
    (r"(?i)^(oxen)$", "${1}"),
    (r"(?i)(quiz)$", "${1}zes"),
];

pub const SINGULARS: &[(&str, &str)] = &[
    (r"(?i)s$", ""),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)(n)ews$", "${1}ews"),
    (r"(?i)([ti])a$", "${1}um"),
    (
        r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)(s)eries$", "${1}eries"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)^(m|l)ice$", "${1}ouse"),
    (r"(?i)(bus)(es)?$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(cris|test)(is|es)$", "${1}is"),
    (r"(?i)^(a)x[ie]s$", "${1}xis"),
    (r"(?i)(octop|vir)(us|i)$", "${1}us"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)^(ox)en", "${1}"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(database)s$", "${1}"),
];

pub const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

pub const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];
