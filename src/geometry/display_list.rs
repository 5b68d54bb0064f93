// geometry/display_list.rs
/// Layout of the `index` array of a [`DispListEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispListKind {
    /// Three indices per triangle.
    Index3,
    /// Four indices per face. A face whose last index repeats the third one
    /// is a triangle.
    Index4,
}

impl DispListKind {
    pub const fn indices_per_face(self) -> usize {
        match self {
            Self::Index3 => 3,
            Self::Index4 => 4,
        }
    }
}

/// One indexed chunk of polygonized surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DispListEntry {
    kind: DispListKind,
    verts: Vec<[f32; 3]>,
    nors: Vec<[f32; 3]>,
    index: Vec<u32>,
}

impl DispListEntry {
    pub fn kind(&self) -> DispListKind {
        self.kind
    }

    pub fn verts(&self) -> &[[f32; 3]] {
        &self.verts
    }

    pub fn nors(&self) -> &[[f32; 3]] {
        &self.nors
    }

    pub fn index(&self) -> &[u32] {
        &self.index
    }

    pub fn face_count(&self) -> usize {
        self.index.len() / self.kind.indices_per_face()
    }

    /// Number of triangles this entry expands to in a flat triangle list.
    pub fn triangle_count(&self) -> usize {
        match self.kind {
            DispListKind::Index3 => self.face_count(),
            DispListKind::Index4 => self
                .index
                .chunks_exact(4)
                .map(|quad| if quad[3] == quad[2] { 1 } else { 2 })
                .sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayListError {
    NormalCountMismatch { verts: usize, nors: usize },
    IndexCountNotMultiple { kind: DispListKind, len: usize },
    IndexOutOfRange { index: u32, vert_count: usize },
}

impl std::fmt::Display for DisplayListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayListError::NormalCountMismatch { verts, nors } => {
                write!(f, "{} normals supplied for {} vertices", nors, verts)
            }
            DisplayListError::IndexCountNotMultiple { kind, len } => write!(
                f,
                "{} indices is not a multiple of {} ({:?})",
                len,
                kind.indices_per_face(),
                kind
            ),
            DisplayListError::IndexOutOfRange { index, vert_count } => {
                write!(f, "index {} out of range for {} vertices", index, vert_count)
            }
        }
    }
}

impl std::error::Error for DisplayListError {}

/// Tessellated surface produced by the polygonizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    entries: Vec<DispListEntry>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an indexed entry after checking it is self-consistent, so the
    /// batch path can index into it without bounds surprises.
    pub fn add_indexed(
        &mut self,
        kind: DispListKind,
        verts: Vec<[f32; 3]>,
        nors: Vec<[f32; 3]>,
        index: Vec<u32>,
    ) -> Result<(), DisplayListError> {
        if verts.len() != nors.len() {
            return Err(DisplayListError::NormalCountMismatch {
                verts: verts.len(),
                nors: nors.len(),
            });
        }
        if index.len() % kind.indices_per_face() != 0 {
            return Err(DisplayListError::IndexCountNotMultiple {
                kind,
                len: index.len(),
            });
        }
        if let Some(&bad) = index.iter().find(|&&i| i as usize >= verts.len()) {
            return Err(DisplayListError::IndexOutOfRange {
                index: bad,
                vert_count: verts.len(),
            });
        }

        self.entries.push(DispListEntry {
            kind,
            verts,
            nors,
            index,
        });
        Ok(())
    }

    pub fn entries(&self) -> &[DispListEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.entries.iter().map(DispListEntry::triangle_count).sum()
    }

    pub fn view(&self) -> DisplayListView<'_> {
        DisplayListView { list: self }
    }
}

/// Per-object geometry cache filled by the polygonizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveCache {
    pub disp: DisplayList,
}

impl CurveCache {
    pub fn new(disp: DisplayList) -> Self {
        Self { disp }
    }
}

/// Non-owning view of a [`DisplayList`].
///
/// Only valid while the owning object is borrowed, i.e. for the current
/// frame's draw preparation. The view never frees what it points at.
#[derive(Debug, Clone, Copy)]
pub struct DisplayListView<'a> {
    list: &'a DisplayList,
}

impl<'a> DisplayListView<'a> {
    pub fn entries(self) -> &'a [DispListEntry] {
        &self.list.entries
    }

    pub fn triangle_count(self) -> usize {
        self.list.triangle_count()
    }
}
