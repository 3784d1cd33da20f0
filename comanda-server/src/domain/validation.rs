//! Input validation
//!
//! Each validator takes the payload as received and returns either the
//! normalized value the store expects or an `AppError` whose `fields`
//! detail names the offending field(s).

use shared::error::{AppError, ErrorCode};
use shared::models::{
    ComandaCreate, NewComanda, NewPedido, NewProduto, PedidoBatch, PedidoCreate, PedidoStatus,
    PedidoStatusUpdate, ProdutoCreate, ProdutoUpdate,
};

/// Entity names: nome_cliente, produto nome
pub const MAX_NAME_LEN: usize = 200;

/// Maximum quantidade per pedido line
pub const MAX_QUANTITY: i64 = 9999;

/// Maximum produto preco
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("fields", vec![field]));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("fields", vec![field]));
    }
    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn out_of_range(field: &str, message: String) -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, message).with_detail("fields", vec![field])
}

/// Validate a price: finite, strictly positive, at most `MAX_PRICE`
fn validate_preco(preco: f64) -> Result<(), AppError> {
    if !preco.is_finite() || preco <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("preco must be greater than zero, got {preco}"),
        )
        .with_detail("fields", vec!["preco"]));
    }
    if preco > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("preco exceeds maximum allowed ({MAX_PRICE}), got {preco}"),
        )
        .with_detail("fields", vec!["preco"]));
    }
    Ok(())
}

/// Validate `POST /comandas`
///
/// Missing `nome_cliente` and `mesa_id` are reported together.
pub fn validate_comanda(input: ComandaCreate) -> Result<NewComanda, AppError> {
    let mut missing = Vec::new();
    if is_blank(&input.nome_cliente) {
        missing.push("nome_cliente");
    }
    if input.mesa_id.is_none() {
        missing.push("mesa_id");
    }
    let (Some(nome_cliente), Some(mesa_id)) = (input.nome_cliente, input.mesa_id) else {
        return Err(AppError::required_fields(&missing));
    };
    if !missing.is_empty() {
        return Err(AppError::required_fields(&missing));
    }

    let nome_cliente = nome_cliente.trim().to_string();
    validate_required_text(&nome_cliente, "nome_cliente", MAX_NAME_LEN)?;
    if mesa_id <= 0 {
        return Err(out_of_range(
            "mesa_id",
            format!("mesa_id must be a positive integer, got {mesa_id}"),
        ));
    }

    Ok(NewComanda {
        nome_cliente,
        mesa_id,
    })
}

/// Validate `POST /produtos`; `disponibilidade` defaults to true
pub fn validate_produto_create(input: ProdutoCreate) -> Result<NewProduto, AppError> {
    let mut missing = Vec::new();
    if is_blank(&input.nome) {
        missing.push("nome");
    }
    if input.preco.is_none() {
        missing.push("preco");
    }
    let (Some(nome), Some(preco)) = (input.nome, input.preco) else {
        return Err(AppError::required_fields(&missing));
    };
    if !missing.is_empty() {
        return Err(AppError::required_fields(&missing));
    }

    let nome = nome.trim().to_string();
    validate_required_text(&nome, "nome", MAX_NAME_LEN)?;
    validate_preco(preco)?;

    Ok(NewProduto {
        nome,
        preco,
        disponibilidade: input.disponibilidade.unwrap_or(true),
    })
}

/// Validate `PATCH /produtos/{id}`: at least one field, each one well formed
pub fn validate_produto_update(input: ProdutoUpdate) -> Result<ProdutoUpdate, AppError> {
    if input.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ValidationFailed,
            "At least one field must be provided: nome, preco, disponibilidade",
        )
        .with_detail("fields", vec!["nome", "preco", "disponibilidade"]));
    }

    let nome = match input.nome {
        Some(nome) => {
            let nome = nome.trim().to_string();
            validate_required_text(&nome, "nome", MAX_NAME_LEN)?;
            Some(nome)
        }
        None => None,
    };
    if let Some(preco) = input.preco {
        validate_preco(preco)?;
    }

    Ok(ProdutoUpdate {
        nome,
        preco: input.preco,
        disponibilidade: input.disponibilidade,
    })
}

/// Validate `POST /pedidos` in any of its three shapes
///
/// Every item is checked before anything is persisted. For the array shape
/// the comanda comes from the first element.
pub fn validate_pedidos(input: PedidoCreate) -> Result<PedidoBatch, AppError> {
    let (comanda_id, itens): (Option<i64>, Vec<(Option<i64>, Option<i64>)>) = match input {
        PedidoCreate::Grouped {
            comanda_id,
            pedidos,
        } => (
            comanda_id,
            pedidos
                .into_iter()
                .map(|p| (p.produto_id, p.quantidade))
                .collect(),
        ),
        PedidoCreate::Batch(list) => (
            list.first().and_then(|p| p.comanda_id),
            list.into_iter()
                .map(|p| (p.produto_id, p.quantidade))
                .collect(),
        ),
        PedidoCreate::Single(p) => (p.comanda_id, vec![(p.produto_id, p.quantidade)]),
    };

    if itens.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    let Some(comanda_id) = comanda_id else {
        return Err(AppError::required_fields(&["comanda_id"]));
    };
    if comanda_id <= 0 {
        return Err(out_of_range(
            "comanda_id",
            format!("comanda_id must be a positive integer, got {comanda_id}"),
        ));
    }

    let mut validated = Vec::with_capacity(itens.len());
    for (index, (produto_id, quantidade)) in itens.into_iter().enumerate() {
        let (Some(produto_id), Some(quantidade)) = (produto_id, quantidade) else {
            let mut missing = Vec::new();
            if produto_id.is_none() {
                missing.push("produto_id");
            }
            if quantidade.is_none() {
                missing.push("quantidade");
            }
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                format!("Item {index}: required fields missing: {}", missing.join(", ")),
            )
            .with_detail("fields", missing)
            .with_detail("index", index));
        };
        if produto_id <= 0 {
            return Err(out_of_range(
                "produto_id",
                format!("Item {index}: produto_id must be a positive integer, got {produto_id}"),
            )
            .with_detail("index", index));
        }
        if !(1..=MAX_QUANTITY).contains(&quantidade) {
            return Err(out_of_range(
                "quantidade",
                format!("Item {index}: quantidade must be between 1 and {MAX_QUANTITY}, got {quantidade}"),
            )
            .with_detail("index", index));
        }
        validated.push(NewPedido {
            produto_id,
            // bounded by MAX_QUANTITY above
            quantidade: quantidade as i32,
        });
    }

    Ok(PedidoBatch {
        comanda_id,
        itens: validated,
    })
}

/// Validate `PATCH /pedidos/{id}`: the status must be one of the known stages
pub fn parse_pedido_status(input: &PedidoStatusUpdate) -> Result<PedidoStatus, AppError> {
    let Some(raw) = input.status.as_deref().filter(|s| !s.trim().is_empty()) else {
        return Err(AppError::required_fields(&["status"]));
    };
    raw.parse::<PedidoStatus>().map_err(|e| {
        AppError::with_message(
            ErrorCode::InvalidOrderStatus,
            format!(
                "Invalid status {:?}. Valid values: {}",
                e.value,
                PedidoStatus::valid_values().join(", ")
            ),
        )
        .with_detail("fields", vec!["status"])
        .with_detail("valid_values", PedidoStatus::valid_values())
    })
}
