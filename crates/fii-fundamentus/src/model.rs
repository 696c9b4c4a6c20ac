//! Mapping from source page labels to [`Fund`] fields.
//!
//! One line per tracked indicator: adding or dropping an indicator is a
//! one-line change here. Labels repeated across the 12-month and 3-month
//! result tables arrive with the `_2` suffix (see `fii_core::RawIndicators`).

use fii_core::{Fund, IndicatorSet, Ticker};

/// Populates a fund record from a normalized indicator set.
///
/// Lookups are exact-match; labels absent from the page leave the field
/// unset, labels not listed here are ignored.
pub(crate) fn fund_from_indicators(ticker: Ticker, indicators: &IndicatorSet) -> Fund {
    let mut fund = Fund::new(ticker);

    // Identity
    fund.name = indicators.text("Nome");
    fund.mandate = indicators.text("Mandato");
    fund.segment = indicators.text("Segmento");
    fund.management_type = indicators.text("Gestão");

    // Quotation
    fund.price = indicators.number("Cotação");
    fund.last_quote_date = indicators.text("Data últ cot");
    fund.low_52_weeks = indicators.number("Min 52 sem");
    fund.high_52_weeks = indicators.number("Max 52 sem");
    fund.avg_volume_2m = indicators.number("Vol $ méd (2m)");
    fund.market_value = indicators.number("Valor de mercado");
    fund.share_count = indicators.number("Nro. Cotas");
    fund.last_quarterly_report = indicators.text("Últ Info Trimestral");
    fund.change_day = indicators.number("Dia");
    fund.change_month = indicators.number("Mês");
    fund.change_30_days = indicators.number("30 dias");
    fund.change_12_months = indicators.number("12 meses");

    // Yield indicators
    fund.ffo_yield = indicators.number("FFO Yield");
    fund.ffo_per_share = indicators.number("FFO/Cota");
    fund.dividend_yield = indicators.number("Div. Yield");
    fund.dividend_per_share = indicators.number("Dividendo/cota");
    fund.price_to_book = indicators.number("P/VP");
    fund.book_value_per_share = indicators.number("VP/Cota");

    // Result indicators: first occurrence is the 12-month table, the
    // suffixed occurrence the 3-month table.
    fund.revenue_12m = indicators.number("Receita");
    fund.asset_sales_12m = indicators.number("Venda de ativos");
    fund.ffo_12m = indicators.number("FFO");
    fund.distributed_income_12m = indicators.number("Rend. Distribuído");
    fund.revenue_3m = indicators.number("Receita_2");
    fund.asset_sales_3m = indicators.number("Venda de ativos_2");
    fund.ffo_3m = indicators.number("FFO_2");
    fund.distributed_income_3m = indicators.number("Rend. Distribuído_2");

    // Equity indicators
    fund.total_assets = indicators.number("Ativos");
    fund.net_equity = indicators.number("Patrim Líquido");

    // Real-estate indicators
    fund.property_count = indicators.number("Qtd imóveis");
    fund.unit_count = indicators.number("Qtd Unidades");
    fund.property_to_equity = indicators.number("Imóveis/PL do FII");
    fund.total_area_sqm = indicators.number("Área (m2)");
    fund.rent_per_sqm = indicators.number("Aluguel/m2");
    fund.price_per_sqm = indicators.number("Preço do m2");
    fund.cap_rate = indicators.number("Cap Rate");
    fund.avg_vacancy = indicators.number("Vacância Média");

    fund
}
