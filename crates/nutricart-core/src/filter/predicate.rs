use std::fmt::Write;

/// Columns of the `items` table that may appear in a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Calories,
    Protein,
    Carbs,
    Fats,
    Fiber,
    Price,
    Favorite,
}

impl Column {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Calories => "calories",
            Column::Protein => "protein",
            Column::Carbs => "carbs",
            Column::Fats => "fats",
            Column::Fiber => "fiber",
            Column::Price => "price",
            Column::Favorite => "favorite",
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    /// Case-insensitive `LIKE` with `\` as the escape character.
    ///
    /// Both sides are folded with [`UNICODE_LOWER_FN`], so accented names
    /// match regardless of case.
    ILike,
}

/// Scalar SQL function the store registers on every connection.
///
/// SQLite's own `LOWER` only folds ASCII.
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One `(column, operator, value)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Column,
    pub op: CmpOp,
    pub value: SqlValue,
}

impl Predicate {
    pub fn new(column: Column, op: CmpOp, value: SqlValue) -> Self {
        Self { column, op, value }
    }

    fn render(&self, placeholder: usize, out: &mut String) {
        let col = self.column.as_sql();
        // Writing into a String cannot fail.
        let _ = match self.op {
            CmpOp::Eq => write!(out, "{} = ?{}", col, placeholder),
            CmpOp::Lt => write!(out, "{} < ?{}", col, placeholder),
            CmpOp::Le => write!(out, "{} <= ?{}", col, placeholder),
            CmpOp::Gt => write!(out, "{} > ?{}", col, placeholder),
            CmpOp::Ge => write!(out, "{} >= ?{}", col, placeholder),
            CmpOp::ILike => write!(
                out,
                "{f}({}) LIKE {f}(?{}) ESCAPE '\\'",
                col,
                placeholder,
                f = UNICODE_LOWER_FN
            ),
        };
    }
}

/// SQL text plus the values for its placeholders, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Column list shared by every catalog read.
pub const ITEM_COLUMNS: &str = "name, calories, protein, carbs, fats, fiber, price, favorite";

/// Builder for a conjunctive catalog query, always ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    predicates: Vec<Predicate>,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one predicate; predicates are AND-ed in insertion order.
    pub fn and(mut self, column: Column, op: CmpOp, value: SqlValue) -> Self {
        self.predicates.push(Predicate::new(column, op, value));
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Case-insensitive containment match on the item name.
    ///
    /// A blank fragment adds no predicate.
    pub fn name_contains(self, fragment: &str) -> Self {
        if fragment.is_empty() {
            return self;
        }
        let pattern = format!("%{}%", escape_like(fragment));
        self.and(Column::Name, CmpOp::ILike, SqlValue::Text(pattern))
    }

    /// Only items flagged as favorites.
    pub fn favorites_only(self) -> Self {
        self.and(Column::Favorite, CmpOp::Eq, SqlValue::Integer(1))
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn compile(&self) -> CompiledQuery {
        let mut sql = format!("SELECT {} FROM items", ITEM_COLUMNS);
        let mut params = Vec::with_capacity(self.predicates.len());

        for (idx, predicate) in self.predicates.iter().enumerate() {
            sql.push_str(if idx == 0 { " WHERE " } else { " AND " });
            predicate.render(idx + 1, &mut sql);
            params.push(predicate.value.clone());
        }
        sql.push_str(" ORDER BY name ASC");

        CompiledQuery { sql, params }
    }
}

/// Escape `LIKE` wildcards so the fragment matches literally under `ESCAPE '\'`.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
