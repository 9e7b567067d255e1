// ============================================================================
// PAGINATION - Paginación en memoria de la tabla
// ============================================================================

use thiserror::Error;

/// Registros por página permitidos en el selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Four,
    Six,
    Ten,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Four, PageSize::Six, PageSize::Ten];

    pub fn get(self) -> usize {
        match self {
            PageSize::Four => 4,
            PageSize::Six => 6,
            PageSize::Ten => 10,
        }
    }

    /// Valor del <select>; cualquier otro número se rechaza
    pub fn from_value(value: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Ya está en la primera página")]
    AtFirstPage,

    #[error("Ya está en la última página")]
    AtLastPage,

    #[error("Página {page} fuera de rango (1..={total_pages})")]
    OutOfRange { page: usize, total_pages: usize },
}

/// Página actual y tamaño de página (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: PageSize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PageSize::default(),
        }
    }
}

pub fn total_pages(count: usize, page_size: PageSize) -> usize {
    count.div_ceil(page_size.get())
}

impl PageState {
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Cambiar el tamaño siempre vuelve a la página 1
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    pub fn previous(&mut self) -> Result<usize, PageError> {
        if self.current_page <= 1 {
            return Err(PageError::AtFirstPage);
        }
        self.current_page -= 1;
        Ok(self.current_page)
    }

    pub fn next(&mut self, count: usize) -> Result<usize, PageError> {
        if self.current_page >= total_pages(count, self.page_size) {
            return Err(PageError::AtLastPage);
        }
        self.current_page += 1;
        Ok(self.current_page)
    }

    pub fn go_to(&mut self, page: usize, count: usize) -> Result<usize, PageError> {
        let total_pages = total_pages(count, self.page_size);
        if page < 1 || page > total_pages {
            return Err(PageError::OutOfRange { page, total_pages });
        }
        self.current_page = page;
        Ok(page)
    }

    /// Tras un borrado, la página actual no puede quedar más allá de la última
    pub fn clamp(&mut self, count: usize) {
        let last = total_pages(count, self.page_size).max(1);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    pub fn view<'a, T>(&self, items: &'a [T]) -> PageView<'a, T> {
        paginate(items, self)
    }
}

/// Resultado de paginar: filas visibles y estado de los controles
#[derive(Debug, PartialEq)]
pub struct PageView<'a, T> {
    pub visible: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl<T> PageView<'_, T> {
    /// "Página X de Y"; None cuando no hay ninguna página
    pub fn label(&self) -> Option<String> {
        (self.total_pages > 0).then(|| format!("Página {} de {}", self.current_page, self.total_pages))
    }
}

pub fn paginate<'a, T>(items: &'a [T], state: &PageState) -> PageView<'a, T> {
    let size = state.page_size.get();
    let total_pages = total_pages(items.len(), state.page_size);
    let start = (state.current_page - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());

    PageView {
        visible: &items[start..end],
        current_page: state.current_page,
        total_pages,
        can_go_previous: state.current_page > 1,
        can_go_next: state.current_page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn five_records_page_size_four() {
        let items = records(5);
        let mut state = PageState::default();

        let page = state.view(&items);
        assert_eq!(page.visible, &[1, 2, 3, 4]);
        assert_eq!(page.total_pages, 2);
        assert!(!page.can_go_previous);
        assert!(page.can_go_next);

        state.next(items.len()).unwrap();
        let page = state.view(&items);
        assert_eq!(page.visible, &[5]);
        assert!(page.can_go_previous);
        assert!(!page.can_go_next);
    }

    #[test]
    fn total_pages_and_slice_lengths_hold_for_all_sizes() {
        for size in PageSize::ALL {
            for n in 0..=23 {
                let items = records(n);
                let mut state = PageState::default();
                state.set_page_size(size);
                let p = size.get();
                let total = (n + p - 1) / p;
                assert_eq!(state.view(&items).total_pages, total);

                for page in 1..=total {
                    state.go_to(page, n).unwrap();
                    let len = state.view(&items).visible.len();
                    if page < total {
                        assert_eq!(len, p);
                    } else if n % p == 0 {
                        assert_eq!(len, p);
                    } else {
                        assert_eq!(len, n % p);
                    }
                }
            }
        }
    }

    #[test]
    fn empty_collection_is_an_empty_page() {
        let items: Vec<usize> = Vec::new();
        let mut state = PageState::default();
        let page = state.view(&items);
        assert!(page.visible.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.can_go_previous);
        assert!(!page.can_go_next);
        assert_eq!(state.next(0), Err(PageError::AtLastPage));
        assert_eq!(state.current_page(), 1);
        assert_eq!(page.label(), None);
    }

    #[test]
    fn label_reports_current_and_total_pages() {
        let items = records(5);
        let mut state = PageState::default();
        assert_eq!(state.view(&items).label().as_deref(), Some("Página 1 de 2"));
        state.next(items.len()).unwrap();
        assert_eq!(state.view(&items).label().as_deref(), Some("Página 2 de 2"));
    }

    #[test]
    fn navigation_is_rejected_at_boundaries() {
        let mut state = PageState::default();
        assert_eq!(state.previous(), Err(PageError::AtFirstPage));
        assert_eq!(state.current_page(), 1);

        state.go_to(3, 10).unwrap();
        assert_eq!(state.next(10), Err(PageError::AtLastPage));
        assert_eq!(state.current_page(), 3);

        assert_eq!(
            state.go_to(4, 10),
            Err(PageError::OutOfRange { page: 4, total_pages: 3 })
        );
        assert_eq!(
            state.go_to(0, 10),
            Err(PageError::OutOfRange { page: 0, total_pages: 3 })
        );
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn changing_page_size_resets_to_first_page() {
        let mut state = PageState::default();
        state.go_to(3, 12).unwrap();
        state.set_page_size(PageSize::Six);
        assert_eq!(state.current_page(), 1);

        state.next(12).unwrap();
        state.set_page_size(PageSize::Six);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn clamp_pulls_back_after_last_page_empties() {
        let mut state = PageState::default();
        state.go_to(2, 5).unwrap();
        state.clamp(4);
        assert_eq!(state.current_page(), 1);

        state.clamp(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn page_size_parses_only_allowed_values() {
        assert_eq!(PageSize::from_value(6), Some(PageSize::Six));
        assert_eq!(PageSize::from_value(10), Some(PageSize::Ten));
        assert_eq!(PageSize::from_value(5), None);
    }
}
