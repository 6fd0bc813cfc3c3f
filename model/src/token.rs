// token.rs — Interned alias-set tokens
//
// An AliasToken names one symbolic equivalence class of storage. Tokens are
// interned process-wide: two tokens interned from the same text compare equal
// and are the same token. Slot 0 is reserved for the wildcard, the token that
// marks an operand as un-analyzable.
//
// The intern table is insert-if-absent, never update, never delete. Token
// text is leaked into 'static storage; tokens live for the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use serde::{Serialize, Serializer};

/// Reserved text for the wildcard token. Not a valid schema identifier, so
/// ordinary interning can never mint a second token with this spelling.
const WILDCARD_TEXT: &str = "*";

/// An interned symbolic identifier for one alias set. Cheap to copy and
/// compare; the original text is recoverable via [`AliasToken::text`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AliasToken(u32);

struct InternTable {
    by_text: HashMap<&'static str, u32>,
    texts: Vec<&'static str>,
}

static TABLE: OnceLock<RwLock<InternTable>> = OnceLock::new();

fn table() -> &'static RwLock<InternTable> {
    TABLE.get_or_init(|| {
        let mut by_text = HashMap::new();
        by_text.insert(WILDCARD_TEXT, 0);
        RwLock::new(InternTable {
            by_text,
            texts: vec![WILDCARD_TEXT],
        })
    })
}

impl AliasToken {
    /// Intern `text`, returning the canonical token for it. Idempotent and
    /// safe under concurrent first-use from multiple registration threads.
    pub fn intern(text: &str) -> AliasToken {
        let lock = table();
        if let Some(&id) = lock.read().unwrap().by_text.get(text) {
            return AliasToken(id);
        }
        let mut guard = lock.write().unwrap();
        // Re-check under the write lock: another thread may have interned
        // the same text between our read and write acquisitions.
        if let Some(&id) = guard.by_text.get(text) {
            return AliasToken(id);
        }
        let id = guard.texts.len() as u32;
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        guard.texts.push(leaked);
        guard.by_text.insert(leaked, id);
        AliasToken(id)
    }

    /// The reserved wildcard token: "may alias anything un-analyzable".
    /// Equal across all call sites.
    pub fn wildcard() -> AliasToken {
        // Slot 0 is seeded when the table is first built.
        table();
        AliasToken(0)
    }

    pub fn is_wildcard(self) -> bool {
        self.0 == 0
    }

    /// The original identifier text this token was interned from.
    pub fn text(self) -> &'static str {
        table().read().unwrap().texts[self.0 as usize]
    }
}

impl fmt::Display for AliasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl fmt::Debug for AliasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AliasToken({})", self.text())
    }
}

impl Serialize for AliasToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.text())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
