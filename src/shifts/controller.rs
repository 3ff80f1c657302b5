//! Opening and closing the bartender's shift

use tracing::{error, info, warn};

use crate::error::Error;
use crate::modal::{Modal, Surface};
use crate::orders::{OrderDraft, OrdersClient};
use crate::render;
use crate::types::{LogOrderRequest, PaymentMethod, ShiftSummary};

use super::ShiftsClient;

/// Whether a shift is open, as last seen on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftState {
    NoActiveShift,
    ShiftActive { shift_id: String, bartender: String },
}

impl ShiftState {
    pub fn shift_id(&self) -> Option<&str> {
        match self {
            ShiftState::NoActiveShift => None,
            ShiftState::ShiftActive { shift_id, .. } => Some(shift_id),
        }
    }
}

/// Shift lifecycle controller
///
/// Starts out with no shift and must be [`ShiftController::load`]ed from the
/// server before it reflects reality.
pub struct ShiftController {
    shifts: ShiftsClient,
    orders: OrdersClient,
    state: ShiftState,
}

impl ShiftController {
    pub fn new(shifts: ShiftsClient, orders: OrdersClient) -> Self {
        Self {
            shifts,
            orders,
            state: ShiftState::NoActiveShift,
        }
    }

    pub fn state(&self) -> &ShiftState {
        &self.state
    }

    /// Re-derive the state from the server
    pub async fn load(&mut self) -> Result<&ShiftState, Error> {
        self.state = match self.shifts.current().await? {
            Some(shift) => ShiftState::ShiftActive {
                shift_id: shift.id,
                bartender: shift.bartender,
            },
            None => ShiftState::NoActiveShift,
        };
        Ok(&self.state)
    }

    /// Load the state, reporting a failure through the modal
    pub async fn refresh<S: Surface>(&mut self, modal: &Modal<S>) -> Result<(), Error> {
        if let Err(e) = self.load().await {
            error!(error = %e, "failed to load shift status");
            modal.error(format!("Nepodařilo se zjistit stav směny: {}", e)).await;
            return Err(e);
        }
        Ok(())
    }

    /// Open a shift for the bartender
    pub async fn start_shift<S: Surface>(&mut self, bartender: &str, modal: &Modal<S>) -> Result<(), Error> {
        let bartender = bartender.trim();
        if bartender.is_empty() {
            modal.error("Zadejte jméno barmana").await;
            return Err(Error::validation("Bartender name is empty"));
        }

        let shift_id = match self.shifts.start(bartender).await {
            Ok(id) => id,
            Err(e) => {
                error!(bartender, error = %e, "failed to start shift");
                modal.error(format!("Směnu se nepodařilo zahájit: {}", e)).await;
                return Err(e);
            }
        };

        match shift_id {
            Some(shift_id) => {
                self.state = ShiftState::ShiftActive {
                    shift_id,
                    bartender: bartender.to_string(),
                };
            }
            None => {
                warn!("start response carried no shift id, asking the server");
                self.refresh(modal).await?;
                if self.state.shift_id().is_none() {
                    error!(bartender, "server reports no open shift after start");
                    modal.error("Směnu se nepodařilo zahájit: server nehlásí aktivní směnu").await;
                    return Err(Error::general("Shift start was not confirmed by the server"));
                }
            }
        }

        info!(bartender, shift = ?self.state.shift_id(), "shift started");
        modal.notify(format!("Směna zahájena: {}", bartender)).await;
        Ok(())
    }

    /// Close the tracked shift and show its summary
    pub async fn end_shift<S: Surface>(&mut self, modal: &Modal<S>) -> Result<ShiftSummary, Error> {
        let Some(shift_id) = self.state.shift_id().map(str::to_string) else {
            modal.error("Žádná aktivní směna k ukončení").await;
            return Err(Error::NoActiveShift);
        };

        if let Err(e) = self.shifts.end(&shift_id).await {
            error!(shift = %shift_id, error = %e, "failed to end shift");
            modal.error(format!("Směnu se nepodařilo ukončit: {}", e)).await;
            return Err(e);
        }
        // The shift is closed server-side from here on, whatever happens to the summary.
        self.state = ShiftState::NoActiveShift;
        info!(shift = %shift_id, "shift ended");

        match self.shifts.summary(&shift_id).await {
            Ok(summary) => {
                modal.notify_markup(render::shift_summary(&summary)).await;
                Ok(summary)
            }
            Err(e) => {
                error!(shift = %shift_id, error = %e, "failed to load shift summary");
                modal.error(format!("Nepodařilo se načíst souhrn směny: {}", e)).await;
                Err(e)
            }
        }
    }

    /// Log the drafted order against the open shift and clear the draft
    pub async fn log_order<S: Surface>(
        &self,
        draft: &mut OrderDraft,
        payment_method: PaymentMethod,
        customer: Option<&str>,
        modal: &Modal<S>,
    ) -> Result<(), Error> {
        let Some(shift_id) = self.state.shift_id() else {
            modal.error("Nejprve zahajte směnu").await;
            return Err(Error::NoActiveShift);
        };
        if draft.is_empty() {
            modal.error("Objednávka je prázdná").await;
            return Err(Error::validation("Order is empty"));
        }
        let customer = customer.map(str::trim).filter(|c| !c.is_empty());
        if payment_method == PaymentMethod::EmployeeAccount && customer.is_none() {
            modal.error("Vyberte zákazníka pro zápis na účet").await;
            return Err(Error::validation("Account payment needs a customer"));
        }

        let request = LogOrderRequest {
            order: draft.lines().to_vec(),
            payment_method,
            total_amount: draft.total(),
            selected_customer: customer.map(str::to_string),
            shift_id: shift_id.to_string(),
        };

        if let Err(e) = self.orders.log(&request).await {
            error!(shift = shift_id, error = %e, "failed to log order");
            modal.error(format!("Objednávku se nepodařilo uložit: {}", e)).await;
            return Err(e);
        }
        draft.clear();
        Ok(())
    }

    /// Render the status line
    pub fn render(&self) -> String {
        render::shift_status(&self.state)
    }
}
