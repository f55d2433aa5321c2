pub mod categoria;
pub mod estoque;
pub mod fornecedor;
pub mod gasto;
pub mod nota_compra;
pub mod nota_venda;
pub mod produto;
pub mod relatorio;
pub mod user;

use rust_decimal::Decimal;
use validator::ValidationError;

// Compartilhada pelos payloads de estoque, notas e gastos.
pub(crate) fn validar_nao_negativo(valor: &Decimal) -> Result<(), ValidationError> {
    if valor.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}
