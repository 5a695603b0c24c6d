use std::rc::Rc;

use tracing::trace;

use crate::ast::{FunctionDef, Node};

/// Initial slot count of a table created with [`SymbolTable::new`].
pub const DEFAULT_CAPACITY: usize = 9997;

/// Handle to a binding in a [`SymbolTable`].
///
/// Handles are plain indices: they do not own the binding and stay valid for
/// the lifetime of the table that issued them, including across resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

/// A named binding: a current value plus an optional function definition.
#[derive(Debug)]
pub struct Symbol {
    name:     String,
    value:    f64,
    function: Option<Rc<FunctionDef>>,
}

impl Symbol {
    fn new(name: &str) -> Self {
        Self { name:     name.to_string(),
               value:    0.0,
               function: None, }
    }

    /// The identifier this binding was created for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The installed function definition, if any.
    #[must_use]
    pub const fn function(&self) -> Option<&Rc<FunctionDef>> {
        self.function.as_ref()
    }
}

/// Returned when a fixed-capacity table has no free slot left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("symbol table overflow: all {capacity} slots are in use")]
pub struct TableFull {
    /// The number of slots in the table.
    pub capacity: usize,
}

/// Maps identifiers to bindings using open addressing with linear probing.
///
/// The slot array holds indices into an append-only arena of symbols, so
/// rehashing never moves a binding and every [`SymbolId`] stays valid. A
/// growable table doubles its slot array before the load factor passes
/// three quarters; a fixed table never grows and reports [`TableFull`]
/// instead.
///
/// ## Example
/// ```
/// use dynacalc::interpreter::symbol_table::SymbolTable;
///
/// let mut table = SymbolTable::new();
/// let x = table.get_or_create("x").unwrap();
///
/// table.set_value(x, 2.5);
/// assert_eq!(table.get_or_create("x").unwrap(), x);
/// assert_eq!(table.value(x), 2.5);
/// ```
#[derive(Debug)]
pub struct SymbolTable {
    slots:    Vec<Option<SymbolId>>,
    symbols:  Vec<Symbol>,
    growable: bool,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashes an identifier with the `hash * 9 ^ byte` rolling hash.
///
/// ## Example
/// ```
/// use dynacalc::interpreter::symbol_table::symbol_hash;
///
/// assert_eq!(symbol_hash("a"), 97);
/// assert_eq!(symbol_hash("ab"), 97 * 9 ^ 98);
/// ```
#[must_use]
pub fn symbol_hash(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |hash, byte| hash.wrapping_mul(9) ^ u32::from(byte))
}

impl SymbolTable {
    /// Creates a growable table with [`DEFAULT_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a growable table with `capacity` initial slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots:    vec![None; capacity.max(1)],
               symbols:  Vec::new(),
               growable: true, }
    }

    /// Creates a table that never grows beyond `capacity` slots.
    #[must_use]
    pub fn fixed(capacity: usize) -> Self {
        Self { growable: false,
               ..Self::with_capacity(capacity) }
    }

    /// The current number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The number of bindings in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no binding has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Looks up `name` without inserting.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        match self.probe(name) {
            Probe::Found(id) => Some(id),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns the binding for `name`, creating it with value `0` on a miss.
    ///
    /// # Errors
    /// Returns [`TableFull`] when the table is fixed and every slot is taken.
    pub fn get_or_create(&mut self, name: &str) -> Result<SymbolId, TableFull> {
        if let Probe::Found(id) = self.probe(name) {
            return Ok(id);
        }

        if self.growable && (self.symbols.len() + 1) * 4 > self.slots.len() * 3 {
            self.grow();
        }

        match self.probe(name) {
            Probe::Found(id) => Ok(id),
            Probe::Vacant(slot) => {
                let id = SymbolId(self.symbols.len());
                self.symbols.push(Symbol::new(name));
                self.slots[slot] = Some(id);
                trace!(name, slot, "created symbol");
                Ok(id)
            },
            Probe::Full => Err(TableFull { capacity: self.slots.len() }),
        }
    }

    /// Gets the binding behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different table.
    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// The name of the binding behind `id`.
    #[must_use]
    pub fn name(&self, id: SymbolId) -> &str {
        &self.symbols[id.0].name
    }

    /// The current value of the binding behind `id`.
    #[must_use]
    pub fn value(&self, id: SymbolId) -> f64 {
        self.symbols[id.0].value
    }

    /// Overwrites the value of the binding behind `id`.
    pub fn set_value(&mut self, id: SymbolId, value: f64) {
        self.symbols[id.0].value = value;
    }

    /// Returns a shared handle to the function defined on `id`, if any.
    #[must_use]
    pub fn function(&self, id: SymbolId) -> Option<Rc<FunctionDef>> {
        self.symbols[id.0].function.clone()
    }

    /// Installs a function on `id`, dropping whatever was defined before.
    ///
    /// A `None` body removes the definition, so later calls report an
    /// undefined function. A call already running the previous definition
    /// keeps it alive until that call returns.
    pub fn define(&mut self, id: SymbolId, params: Vec<SymbolId>, body: Option<Node>) {
        let function = body.map(|body| Rc::new(FunctionDef { params, body }));
        self.symbols[id.0].function = function;
    }

    fn probe(&self, name: &str) -> Probe {
        let capacity = self.slots.len();
        let hash = symbol_hash(name);
        let start = hash as usize % capacity;
        trace!(name, hash, slot = start, "probing symbol table");

        for offset in 0..capacity {
            let slot = (start + offset) % capacity;
            match self.slots[slot] {
                None => return Probe::Vacant(slot),
                Some(id) if self.symbols[id.0].name == name => return Probe::Found(id),
                Some(_) => {},
            }
        }
        Probe::Full
    }

    fn grow(&mut self) {
        let capacity = self.slots.len() * 2 + 1;
        trace!(from = self.slots.len(), to = capacity, "growing symbol table");

        let mut slots = vec![None; capacity];
        for (index, symbol) in self.symbols.iter().enumerate() {
            let mut slot = symbol_hash(&symbol.name) as usize % capacity;
            while slots[slot].is_some() {
                slot = (slot + 1) % capacity;
            }
            slots[slot] = Some(SymbolId(index));
        }
        self.slots = slots;
    }
}

enum Probe {
    Found(SymbolId),
    Vacant(usize),
    Full,
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn repeated_lookup_returns_the_same_binding() {
        let mut table = SymbolTable::new();
        let first = table.get_or_create("alpha").unwrap();
        let second = table.get_or_create("alpha").unwrap();

        assert_eq!(first, second);
        assert!(std::ptr::eq(table.symbol(first), table.symbol(second)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn fresh_binding_starts_at_zero_without_function() {
        let mut table = SymbolTable::new();
        let id = table.get_or_create("fresh").unwrap();

        assert_eq!(table.value(id), 0.0);
        assert!(table.function(id).is_none());
        assert_eq!(table.name(id), "fresh");
    }

    #[test]
    fn get_does_not_insert() {
        let mut table = SymbolTable::new();
        assert_eq!(table.get("missing"), None);
        assert!(table.is_empty());

        let id = table.get_or_create("missing").unwrap();
        assert_eq!(table.get("missing"), Some(id));
    }

    #[test]
    fn insertion_order_does_not_affect_lookups() {
        let names = ["a", "b", "ab", "ba", "abc", "cab", "x1", "x2", "y"];

        let mut forward = SymbolTable::with_capacity(3);
        for (i, name) in names.iter().enumerate() {
            let id = forward.get_or_create(name).unwrap();
            forward.set_value(id, i as f64);
        }

        let mut backward = SymbolTable::with_capacity(3);
        for (i, name) in names.iter().enumerate().rev() {
            let id = backward.get_or_create(name).unwrap();
            backward.set_value(id, i as f64);
        }

        for (i, name) in names.iter().enumerate() {
            let f = forward.get(name).unwrap();
            let b = backward.get(name).unwrap();
            assert_eq!(forward.value(f), i as f64);
            assert_eq!(backward.value(b), i as f64);
        }
    }

    #[test]
    fn colliding_names_probe_to_distinct_slots() {
        // "a" hashes to 97 and "c" to 99: both land on slot 1.
        let mut table = SymbolTable::fixed(2);
        let a = table.get_or_create("a").unwrap();
        let c = table.get_or_create("c").unwrap();

        assert_ne!(a, c);
        assert_eq!(table.get("a"), Some(a));
        assert_eq!(table.get("c"), Some(c));
    }

    #[test]
    fn fixed_table_reports_overflow() {
        let mut table = SymbolTable::fixed(2);
        table.get_or_create("a").unwrap();
        table.get_or_create("b").unwrap();

        assert_eq!(table.get_or_create("c"), Err(TableFull { capacity: 2 }));
        assert!(table.get_or_create("a").is_ok());
        assert_eq!(table.get("c"), None);
    }

    #[test]
    fn growable_table_keeps_handles_across_resizes() {
        let mut table = SymbolTable::with_capacity(1);
        let ids: Vec<_> = (0..100).map(|i| table.get_or_create(&format!("v{i}")).unwrap())
                                  .collect();

        assert!(table.capacity() > 100);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(table.get(&format!("v{i}")), Some(*id));
            assert_eq!(table.name(*id), format!("v{i}"));
        }
    }

    #[test]
    fn redefinition_releases_the_previous_definition() {
        let mut table = SymbolTable::new();
        let f = table.get_or_create("f").unwrap();
        let x = table.get_or_create("x").unwrap();

        table.define(f, vec![x], Some(Node::reference(x)));
        let old = Rc::downgrade(&table.function(f).unwrap());

        table.define(f, vec![x], Some(Node::number(1.0)));
        assert!(old.upgrade().is_none());
        assert_eq!(table.function(f).unwrap().body, Node::number(1.0));
    }

    #[test]
    fn in_flight_definition_outlives_redefinition() {
        let mut table = SymbolTable::new();
        let f = table.get_or_create("f").unwrap();

        table.define(f, Vec::new(), Some(Node::number(1.0)));
        let running = table.function(f).unwrap();
        table.define(f, Vec::new(), None);

        assert_eq!(running.body, Node::number(1.0));
        assert!(table.function(f).is_none());
    }

    #[test]
    fn hash_matches_the_rolling_formula() {
        let expected = "sq".bytes()
                           .fold(0u32, |h, b| h.wrapping_mul(9) ^ u32::from(b));
        assert_eq!(symbol_hash("sq"), expected);
        assert_eq!(symbol_hash(""), 0);
    }
}
