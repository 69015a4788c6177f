use crate::geom::Size;

use super::{BookContent, PageCanvas};

/// Pages backed by host-side interactive elements, one per page.
///
/// Drawing a page only registers its element; the host positions the element
/// with the transform the engine had active for that page.
#[derive(Clone, Debug, Default)]
pub struct ElementPages {
    ids: Vec<String>,
}

impl ElementPages {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }
}

impl<S: Into<String>> FromIterator<S> for ElementPages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl BookContent for ElementPages {
    fn page_count(&mut self, _page_size: Size) -> usize {
        self.ids.len()
    }

    fn render_page(&mut self, index: usize, _page_size: Size, canvas: &mut PageCanvas<'_>) {
        if let Some(id) = self.ids.get(index) {
            canvas.register_element(id);
        }
    }
}
