use std::cmp::Ordering;

const INITIAL_CAPACITY: usize = 16;

/// The storage type of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    I8,
    I16,
    I32,
    F32,
}

/// Declares one named, typed column of a [`ColumnStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ColumnData {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
}

impl ColumnData {
    fn zeroed(column_type: ColumnType, len: usize) -> Self {
        match column_type {
            ColumnType::I8 => ColumnData::I8(vec![0; len]),
            ColumnType::I16 => ColumnData::I16(vec![0; len]),
            ColumnType::I32 => ColumnData::I32(vec![0; len]),
            ColumnType::F32 => ColumnData::F32(vec![0.0; len]),
        }
    }

    fn resize(&mut self, len: usize) {
        match self {
            ColumnData::I8(v) => v.resize(len, 0),
            ColumnData::I16(v) => v.resize(len, 0),
            ColumnData::I32(v) => v.resize(len, 0),
            ColumnData::F32(v) => v.resize(len, 0.0),
        }
    }

    fn permute(&mut self, permutation: &[usize]) {
        fn apply<T: Copy>(values: &mut [T], permutation: &[usize]) {
            let reordered: Vec<T> = permutation.iter().map(|&row| values[row]).collect();
            values[..reordered.len()].copy_from_slice(&reordered);
        }
        match self {
            ColumnData::I8(v) => apply(v, permutation),
            ColumnData::I16(v) => apply(v, permutation),
            ColumnData::I32(v) => apply(v, permutation),
            ColumnData::F32(v) => apply(v, permutation),
        }
    }

    fn zero_row(&mut self, row: usize) {
        match self {
            ColumnData::I8(v) => v[row] = 0,
            ColumnData::I16(v) => v[row] = 0,
            ColumnData::I32(v) => v[row] = 0,
            ColumnData::F32(v) => v[row] = 0.0,
        }
    }
}

/// A growable table of fixed, typed columns.
///
/// Every column always has the same physical length (the capacity), which
/// grows geometrically; `count` is the number of logical rows. Rows are only
/// ever appended with [`ColumnStore::increment`], and the only reordering
/// operation is a whole-table [`ColumnStore::sort_by`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStore {
    specs: Vec<ColumnSpec>,
    columns: Vec<ColumnData>,
    count: usize,
    capacity: usize,
}

macro_rules! typed_accessors {
    ($get:ident, $set:ident, $variant:ident, $ty:ty) => {
        #[inline]
        pub fn $get(&self, column: usize, row: usize) -> $ty {
            self.check_row(row);
            match &self.columns[column] {
                ColumnData::$variant(values) => values[row],
                _ => self.type_mismatch(column, stringify!($variant)),
            }
        }

        #[inline]
        pub fn $set(&mut self, column: usize, row: usize, value: $ty) {
            self.check_row(row);
            if let ColumnData::$variant(values) = &mut self.columns[column] {
                values[row] = value;
                return;
            }
            self.type_mismatch(column, stringify!($variant))
        }
    };
}

impl ColumnStore {
    pub fn new(specs: &[ColumnSpec]) -> Self {
        Self {
            specs: specs.to_vec(),
            columns: specs
                .iter()
                .map(|spec| ColumnData::zeroed(spec.column_type, INITIAL_CAPACITY))
                .collect(),
            count: 0,
            capacity: INITIAL_CAPACITY,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    /// Looks up a column index by its declared name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.name == name)
    }

    /// Appends one zero-initialised row to every column and returns its index.
    pub fn increment(&mut self) -> usize {
        if self.count == self.capacity {
            self.capacity *= 2;
            for column in &mut self.columns {
                column.resize(self.capacity);
            }
        }
        let row = self.count;
        for column in &mut self.columns {
            column.zero_row(row);
        }
        self.count += 1;
        row
    }

    /// Drops every logical row while keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Reorders rows `0..count` of every column by one permutation, derived
    /// from a comparator over row indices. The sort is stable.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Self, usize, usize) -> Ordering,
    {
        let mut permutation: Vec<usize> = (0..self.count).collect();
        let this = &*self;
        permutation.sort_by(|&a, &b| compare(this, a, b));
        for column in &mut self.columns {
            column.permute(&permutation);
        }
    }

    typed_accessors!(get_i8, set_i8, I8, i8);
    typed_accessors!(get_i16, set_i16, I16, i16);
    typed_accessors!(get_i32, set_i32, I32, i32);
    typed_accessors!(get_f32, set_f32, F32, f32);

    #[inline]
    fn check_row(&self, row: usize) {
        assert!(
            row < self.count,
            "row {} out of bounds for table of {} rows",
            row,
            self.count
        );
    }

    #[cold]
    fn type_mismatch(&self, column: usize, requested: &str) -> ! {
        panic!(
            "column '{}' is {:?}, not {}",
            self.specs[column].name, self.specs[column].column_type, requested
        )
    }
}
