//! Money calculation using rust_decimal for precision
//!
//! Sums are done in `Decimal` and converted back to `f64` rounded to two
//! places for serialization.

use rust_decimal::prelude::*;
use shared::models::{
    Comanda, ComandaDetail, ComandaPedido, ComandaRef, MesaRef, MesaSummary, Pedido,
    PedidoDetail, ProdutoRef,
};

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal; non-finite values contribute zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value = ?value, "Non-finite price in total calculation, counting as zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// preco x quantidade; a missing side counts as zero
///
/// Saturates at `Decimal::MAX` instead of overflowing (rows written before
/// the price cap existed can still be read).
pub fn line_total(preco: Option<f64>, quantidade: Option<i64>) -> Decimal {
    match (preco, quantidade) {
        (Some(preco), Some(quantidade)) => to_decimal(preco)
            .checked_mul(Decimal::from(quantidade))
            .unwrap_or_else(|| {
                tracing::warn!(preco, quantidade, "Line total overflowed, saturating");
                Decimal::MAX
            }),
        _ => Decimal::ZERO,
    }
}

/// Sum of every line, rounded once at the end
pub fn total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (Option<f64>, Option<i64>)>,
{
    let mut sum = Decimal::ZERO;
    for (preco, quantidade) in lines {
        let line = line_total(preco, quantidade);
        sum = match sum.checked_add(line) {
            Some(next) => next,
            None => {
                tracing::warn!("Total overflowed, saturating");
                Decimal::MAX
            }
        };
    }
    to_f64(sum)
}

/// Total of a comanda's pedidos (cancelled lines included)
pub fn comanda_total(pedidos: &[ComandaPedido]) -> f64 {
    total(pedidos.iter().map(|p| {
        (
            p.produto.as_ref().map(|produto| produto.preco),
            Some(i64::from(p.quantidade)),
        )
    }))
}

/// Assemble a comanda read model with its total
pub fn comanda_detail(
    comanda: Comanda,
    mesa: Option<MesaSummary>,
    pedidos: Vec<ComandaPedido>,
) -> ComandaDetail {
    let total = comanda_total(&pedidos);
    ComandaDetail {
        comanda,
        mesa,
        pedidos,
        total,
    }
}

/// Assemble a pedido read model with its line total
pub fn pedido_detail(
    pedido: Pedido,
    produto: Option<ProdutoRef>,
    mesa: Option<MesaRef>,
    comanda: Option<ComandaRef>,
) -> PedidoDetail {
    let total = to_f64(line_total(
        produto.as_ref().map(|p| p.preco),
        Some(i64::from(pedido.quantidade)),
    ));
    PedidoDetail {
        pedido,
        produto,
        mesa,
        comanda,
        total,
    }
}

/// Nested view of a pedido inside a comanda
pub fn comanda_pedido(pedido: &Pedido, produto: Option<ProdutoRef>) -> ComandaPedido {
    ComandaPedido {
        id: pedido.id,
        produto_id: pedido.produto_id,
        quantidade: pedido.quantidade,
        status: pedido.status,
        criado_em: pedido.criado_em,
        produto,
    }
}
