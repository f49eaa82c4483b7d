//! Menu synthesis.

use satchel_spec::{slot_parameter_name, ExpressionsMenu, InventorySlot, MenuControl};

use crate::template::Template;

/// Appends one toggle per slot, in slot order, to the basis or an empty menu.
pub fn synthesize_menu(
    basis: Template<ExpressionsMenu>,
    slots: &[InventorySlot],
) -> ExpressionsMenu {
    let mut menu = basis.into_document();
    menu.controls.extend(slots.iter().enumerate().map(|(i, slot)| {
        MenuControl::toggle(slot.name.clone(), slot.icon.clone(), slot_parameter_name(i))
    }));
    menu
}
