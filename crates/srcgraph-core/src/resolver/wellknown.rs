//! Fixed table of well-known JDK types.
//!
//! Stands in for the platform's reflective type system: simple names
//! resolve only for `java.lang` (implicitly imported), everything else
//! must arrive qualified or through an import.

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

use super::catalog::{CatalogEntry, TypeCatalog};

const WELL_KNOWN_TYPES: &[&str] = &[
    // java.lang
    "java.lang.Object",
    "java.lang.String",
    "java.lang.CharSequence",
    "java.lang.StringBuilder",
    "java.lang.StringBuffer",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Short",
    "java.lang.Byte",
    "java.lang.Double",
    "java.lang.Float",
    "java.lang.Character",
    "java.lang.Boolean",
    "java.lang.Void",
    "java.lang.Number",
    "java.lang.Math",
    "java.lang.System",
    "java.lang.Thread",
    "java.lang.Runnable",
    "java.lang.Iterable",
    "java.lang.Comparable",
    "java.lang.Cloneable",
    "java.lang.AutoCloseable",
    "java.lang.Class",
    "java.lang.Enum",
    "java.lang.Record",
    "java.lang.Throwable",
    "java.lang.Error",
    "java.lang.Exception",
    "java.lang.RuntimeException",
    "java.lang.IllegalArgumentException",
    "java.lang.IllegalStateException",
    "java.lang.NullPointerException",
    "java.lang.UnsupportedOperationException",
    "java.lang.IndexOutOfBoundsException",
    "java.lang.ClassCastException",
    "java.lang.InterruptedException",
    "java.lang.Override",
    "java.lang.Deprecated",
    "java.lang.SuppressWarnings",
    "java.lang.FunctionalInterface",
    "java.lang.SafeVarargs",
    // java.util
    "java.util.List",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Map",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.TreeMap",
    "java.util.Set",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.TreeSet",
    "java.util.Collection",
    "java.util.Collections",
    "java.util.Arrays",
    "java.util.Iterator",
    "java.util.Optional",
    "java.util.Queue",
    "java.util.Deque",
    "java.util.ArrayDeque",
    "java.util.Comparator",
    "java.util.Objects",
    "java.util.Date",
    "java.util.Calendar",
    "java.util.UUID",
    "java.util.Random",
    "java.util.Scanner",
    "java.util.Properties",
    "java.util.concurrent.ConcurrentHashMap",
    "java.util.concurrent.CompletableFuture",
    "java.util.concurrent.ExecutorService",
    "java.util.concurrent.TimeUnit",
    "java.util.function.Function",
    "java.util.function.Supplier",
    "java.util.function.Consumer",
    "java.util.function.Predicate",
    "java.util.function.BiFunction",
    "java.util.regex.Pattern",
    "java.util.regex.Matcher",
    "java.util.stream.Stream",
    "java.util.stream.Collectors",
    "java.util.stream.IntStream",
    // java.io / java.nio
    "java.io.File",
    "java.io.InputStream",
    "java.io.OutputStream",
    "java.io.Reader",
    "java.io.Writer",
    "java.io.BufferedReader",
    "java.io.PrintStream",
    "java.io.PrintWriter",
    "java.io.IOException",
    "java.io.UncheckedIOException",
    "java.io.Serializable",
    "java.nio.file.Path",
    "java.nio.file.Paths",
    "java.nio.file.Files",
    "java.nio.charset.Charset",
    "java.nio.charset.StandardCharsets",
    // java.math / java.time / java.net / java.sql
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "java.time.LocalDate",
    "java.time.LocalTime",
    "java.time.LocalDateTime",
    "java.time.Instant",
    "java.time.Duration",
    "java.time.ZonedDateTime",
    "java.net.URI",
    "java.net.URL",
    "java.sql.Connection",
    "java.sql.ResultSet",
    "java.sql.SQLException",
    "java.sql.Timestamp",
];

static QUALIFIED: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| WELL_KNOWN_TYPES.iter().copied().collect());

static JAVA_LANG_BY_SIMPLE: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    WELL_KNOWN_TYPES
        .iter()
        .filter_map(|q| {
            let simple = q.strip_prefix("java.lang.")?;
            // only direct members of java.lang are implicitly imported
            if simple.contains('.') {
                return None;
            }
            Some((simple, *q))
        })
        .collect()
});

/// Catalog of well-known external platform types.
#[derive(Debug, Default)]
pub struct WellKnownCatalog;

impl WellKnownCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl TypeCatalog for WellKnownCatalog {
    fn lookup(&self, candidate: &str) -> Option<CatalogEntry> {
        let qualified = if candidate.contains('.') {
            *QUALIFIED.get(candidate)?
        } else {
            *JAVA_LANG_BY_SIMPLE.get(candidate)?
        };
        Some(CatalogEntry {
            qualified: qualified.to_string(),
            internal: false,
        })
    }
}
