use std::{collections::HashMap, fmt::Display};

pub type ScopeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Program-wide root, used only for the cross-category name rules.
    Everywhere,
    /// Global variable declarations.
    Global,
    /// Sibling-uniqueness domain for procedure names.
    ProcGroup,
    /// Sibling-uniqueness domain for function names.
    FuncGroup,
    Main,
    /// Parameters and locals of one procedure or function definition.
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolCategory {
    Variable,
    Procedure,
    Function,
}

impl Display for SymbolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolCategory::Variable => write!(f, "variable"),
            SymbolCategory::Procedure => write!(f, "procedure"),
            SymbolCategory::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub category: SymbolCategory,
    /// Source line of the declaration.
    pub line: u32,
    /// Ordered parameter names; only populated for procedures and functions.
    pub params: Vec<String>,
}

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Human-readable scope name used in diagnostics, e.g. `Local(proc foo)`.
    pub label: String,
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

/// The scope tree for one compilation.
///
/// The five fixed scopes (Everywhere, Global, ProcGroup, FuncGroup, Main)
/// are created up front; one Local scope is added per procedure/function
/// definition. Created fresh per compilation and discarded after emission.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    pub everywhere: ScopeId,
    pub global: ScopeId,
    pub proc_group: ScopeId,
    pub func_group: ScopeId,
    pub main: ScopeId,
    /// Maps a procedure/function name to its Local scope.
    local_scopes: HashMap<String, ScopeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = SymbolTable {
            scopes: vec![],
            everywhere: 0,
            global: 0,
            proc_group: 0,
            func_group: 0,
            main: 0,
            local_scopes: HashMap::new(),
        };

        table.everywhere = table.add_scope(ScopeKind::Everywhere, None, "Everywhere scope");
        table.global = table.add_scope(ScopeKind::Global, Some(table.everywhere), "Global scope");
        table.proc_group = table.add_scope(
            ScopeKind::ProcGroup,
            Some(table.everywhere),
            "the procedure list",
        );
        table.func_group = table.add_scope(
            ScopeKind::FuncGroup,
            Some(table.everywhere),
            "the function list",
        );
        table.main = table.add_scope(ScopeKind::Main, Some(table.global), "Main scope");

        table
    }

    fn add_scope(&mut self, kind: ScopeKind, parent: Option<ScopeId>, label: &str) -> ScopeId {
        self.scopes.push(Scope {
            kind,
            parent,
            label: String::from(label),
            symbols: HashMap::new(),
        });
        self.scopes.len() - 1
    }

    /// Adds the Local scope of one procedure or function definition.
    ///
    /// Local scopes resolve through Global, never through the sibling
    /// definitions or Main.
    pub fn add_local_scope(&mut self, owner: &str, label: String) -> ScopeId {
        self.scopes.push(Scope {
            kind: ScopeKind::Local,
            parent: Some(self.global),
            label,
            symbols: HashMap::new(),
        });
        let id = self.scopes.len() - 1;
        self.local_scopes.insert(String::from(owner), id);
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// Declares a symbol, failing if the name is already taken in the scope.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), Symbol> {
        let symbols = &mut self.scopes[scope].symbols;
        if let Some(existing) = symbols.get(&symbol.name) {
            return Err(existing.clone());
        }
        symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Resolves a variable reference through the parent chain of `scope`.
    pub fn resolve_variable(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(symbol) = self.scopes[id].get_symbol(name) {
                return Some(symbol);
            }
            current = self.scopes[id].parent;
        }
        None
    }

    /// Resolves a statement-call name; only the ProcGroup scope is searched.
    pub fn resolve_procedure(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.proc_group].get_symbol(name)
    }

    /// Resolves an assignment-call name; only the FuncGroup scope is searched.
    pub fn resolve_function(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.func_group].get_symbol(name)
    }

    /// The Local scope of the named procedure/function definition.
    pub fn local_scope_of(&self, owner: &str) -> Option<ScopeId> {
        self.local_scopes.get(owner).copied()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
