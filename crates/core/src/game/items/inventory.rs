//! Stack placement for the hotbar and the bag.

use crate::rules::Rules;
use crate::state::{ItemStack, Player};

/// Offers `offered` to the player's inventory and returns how many units were
/// taken. Placement order: matching hotbar stacks, empty hotbar slots,
/// matching bag stacks, then fresh bag stacks while the bag has room.
/// Units that do not fit stay with the caller.
pub(crate) fn stow(player: &mut Player, rules: &Rules, offered: &ItemStack) -> u32 {
    let limit = rules.stack_limit(offered.kind);
    let mut remaining = offered.quantity;

    if offered.kind.hotbar_eligible() {
        for slot in player.hotbar.iter_mut().flatten() {
            if slot.matches(offered) {
                remaining -= top_up(slot, limit, remaining);
            }
        }
        for slot in player.hotbar.iter_mut().filter(|slot| slot.is_none()) {
            if remaining == 0 {
                break;
            }
            let quantity = remaining.min(limit);
            *slot = Some(ItemStack { quantity, ..offered.clone() });
            remaining -= quantity;
        }
    }

    for stack in player.bag.iter_mut() {
        if stack.matches(offered) {
            remaining -= top_up(stack, limit, remaining);
        }
    }
    while remaining > 0 && player.bag.len() < rules.inventory.bag_capacity {
        let quantity = remaining.min(limit);
        player.bag.push(ItemStack { quantity, ..offered.clone() });
        remaining -= quantity;
    }

    offered.quantity - remaining
}

fn top_up(stack: &mut ItemStack, limit: u32, available: u32) -> u32 {
    let moved = limit.saturating_sub(stack.quantity).min(available);
    stack.quantity += moved;
    moved
}

/// Removes one unit from a hotbar slot, clearing the slot when it empties.
pub(crate) fn take_from_hotbar(player: &mut Player, slot: usize) -> Option<ItemStack> {
    let entry = player.hotbar.get_mut(slot)?;
    let stack = entry.as_mut().filter(|stack| stack.quantity > 0)?;
    stack.quantity -= 1;
    let unit = ItemStack { quantity: 1, ..stack.clone() };
    if stack.quantity == 0 {
        *entry = None;
    }
    Some(unit)
}

/// Removes one unit from a bag stack, dropping the stack when it empties.
pub(crate) fn take_from_bag(player: &mut Player, index: usize) -> Option<ItemStack> {
    let stack = player.bag.get_mut(index).filter(|stack| stack.quantity > 0)?;
    stack.quantity -= 1;
    let unit = ItemStack { quantity: 1, ..stack.clone() };
    if stack.quantity == 0 {
        player.bag.remove(index);
    }
    Some(unit)
}
