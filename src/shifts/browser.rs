//! Paginated shift history with per-shift order tables

use tracing::{error, info};

use crate::error::Error;
use crate::inventory::InventoryClient;
use crate::modal::{Modal, Surface};
use crate::orders::OrdersClient;
use crate::render;
use crate::types::{Product, Shift, ShiftPage};

use super::ShiftsClient;

/// Page position as last reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: u32,
    total_pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl Pager {
    /// Take the page position from a server response
    pub fn from_response(page: &ShiftPage, requested: u32) -> Self {
        let current_page = if page.current_page == 0 { requested } else { page.current_page };
        Self {
            current_page: current_page.max(1),
            total_pages: page.total_pages,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Prev is disabled on the first page
    pub fn prev_disabled(&self) -> bool {
        self.current_page == 1
    }

    /// Next is disabled on the last page, or when there are no pages at all
    pub fn next_disabled(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// What to do with an order in a shift's table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Cancel,
    Restore,
}

/// The shift history view
pub struct ShiftBrowser {
    shifts: ShiftsClient,
    orders: OrdersClient,
    inventory: InventoryClient,
    limit: u32,
    pager: Pager,
    page: Vec<Shift>,
    expanded: Option<String>,
    products: Vec<Product>,
}

impl ShiftBrowser {
    pub fn new(shifts: ShiftsClient, orders: OrdersClient, inventory: InventoryClient, limit: u32) -> Self {
        Self {
            shifts,
            orders,
            inventory,
            limit: limit.max(1),
            pager: Pager::default(),
            page: Vec::new(),
            expanded: None,
            products: Vec::new(),
        }
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.page
    }

    /// Inventory as of the last refresh triggered by a cancel or restore
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Fetch a page; the view keeps its previous page on failure
    pub async fn load(&mut self, page: u32) -> Result<(), Error> {
        let page = page.max(1);
        let response = self.shifts.page(page, self.limit).await?;
        self.pager = Pager::from_response(&response, page);
        self.page = response.shifts;
        let still_listed = match &self.expanded {
            Some(id) => self.page.iter().any(|shift| &shift.id == id),
            None => true,
        };
        if !still_listed {
            self.expanded = None;
        }
        Ok(())
    }

    /// Fetch a page, reporting a failure through the modal
    pub async fn show_page<S: Surface>(&mut self, page: u32, modal: &Modal<S>) -> Result<(), Error> {
        if let Err(e) = self.load(page).await {
            error!(page, error = %e, "failed to load shifts");
            modal.error(format!("Nepodařilo se načíst směny: {}", e)).await;
            return Err(e);
        }
        Ok(())
    }

    /// Re-fetch the current page
    pub async fn refresh<S: Surface>(&mut self, modal: &Modal<S>) -> Result<(), Error> {
        self.show_page(self.pager.current_page(), modal).await
    }

    /// Go to the next page; does nothing on the last page
    pub async fn next<S: Surface>(&mut self, modal: &Modal<S>) -> Result<bool, Error> {
        if self.pager.next_disabled() {
            return Ok(false);
        }
        self.show_page(self.pager.current_page() + 1, modal).await?;
        Ok(true)
    }

    /// Go to the previous page; does nothing on the first page
    pub async fn prev<S: Surface>(&mut self, modal: &Modal<S>) -> Result<bool, Error> {
        if self.pager.prev_disabled() {
            return Ok(false);
        }
        self.show_page(self.pager.current_page() - 1, modal).await?;
        Ok(true)
    }

    /// Expand or collapse a shift row; returns the order table when expanded
    pub fn toggle(&mut self, shift_id: &str) -> Option<String> {
        if self.expanded.as_deref() == Some(shift_id) {
            self.expanded = None;
            return None;
        }
        let table = self.order_table(shift_id)?;
        self.expanded = Some(shift_id.to_string());
        Some(table)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Order table of a shift on the current page
    pub fn order_table(&self, shift_id: &str) -> Option<String> {
        self.page
            .iter()
            .find(|shift| shift.id == shift_id)
            .map(|shift| render::order_table(&shift.order_items))
    }

    /// Cancel an order after confirmation
    pub async fn cancel_order<S: Surface>(&mut self, order_id: &str, modal: &Modal<S>) -> Result<bool, Error> {
        self.apply(OrderAction::Cancel, order_id, modal).await
    }

    /// Restore a cancelled order after confirmation
    pub async fn restore_order<S: Surface>(&mut self, order_id: &str, modal: &Modal<S>) -> Result<bool, Error> {
        self.apply(OrderAction::Restore, order_id, modal).await
    }

    /// Confirm, mutate, refresh inventory, then re-fetch the shifts.
    /// Each step is its own round trip; a failure stops the chain.
    async fn apply<S: Surface>(
        &mut self,
        action: OrderAction,
        order_id: &str,
        modal: &Modal<S>,
    ) -> Result<bool, Error> {
        let question = match action {
            OrderAction::Cancel => format!("Opravdu zrušit objednávku #{}?", order_id),
            OrderAction::Restore => format!("Obnovit objednávku #{}?", order_id),
        };
        if !modal.confirm(question).await {
            return Ok(false);
        }

        let result = match action {
            OrderAction::Cancel => self.orders.cancel(order_id).await,
            OrderAction::Restore => self.orders.restore(order_id).await,
        };
        if let Err(e) = result {
            error!(order = order_id, ?action, error = %e, "order update failed");
            modal.error(format!("Objednávku se nepodařilo upravit: {}", e)).await;
            return Err(e);
        }

        match self.inventory.products().await {
            Ok(products) => self.products = products,
            Err(e) => {
                error!(error = %e, "inventory refresh failed");
                modal.error(format!("Nepodařilo se obnovit sklad: {}", e)).await;
                return Err(e);
            }
        }

        info!(order = order_id, ?action, "order updated");
        self.refresh(modal).await?;
        Ok(true)
    }

    /// Render the current page with its navigation state
    pub fn render(&self) -> String {
        render::shift_page(&self.page, &self.pager, self.expanded.as_deref())
    }
}
