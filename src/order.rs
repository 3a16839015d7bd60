//! Order aggregate and its explicit deep copy
use super::error::OrderError;
use rust_decimal::Decimal;
use tracing::debug;

/// Produces a copy that shares no state with `self` at any depth.
///
/// Implementations duplicate every field themselves, and composite types call
/// `deep_clone` on each element they own.
pub trait DeepClone {
    fn deep_clone(&self) -> Self;
}

#[derive(Debug, PartialEq, Eq)]
pub struct Product {
    name: String,
    price: Decimal,
    quantity: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Discount {
    name: String,
    value: Decimal,
}

// Owns its products and discounts outright, no element is ever shared with another order
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Order {
    products: Vec<Product>,
    discounts: Vec<Discount>,
    delivery_cost: Decimal,
    payment_method: String, // free text, e.g. "Card"
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        let name = name.into();
        check_price(&name, price)?;
        Ok(Self {
            name,
            price,
            quantity,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn price(&self) -> Decimal {
        self.price
    }
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
    pub fn set_price(&mut self, price: Decimal) -> Result<(), OrderError> {
        check_price(&self.name, price)?;
        self.price = price;
        Ok(())
    }
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
    /// price * quantity
    pub fn line_total(&self) -> Result<Decimal, OrderError> {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(OrderError::TotalOverflow("line total"))
    }
}

fn check_price(name: &str, price: Decimal) -> Result<(), OrderError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(OrderError::NegativePrice {
            name: name.to_owned(),
            price,
        });
    }
    Ok(())
}

impl Discount {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn value(&self) -> Decimal {
        self.value
    }
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
    pub fn set_value(&mut self, value: Decimal) {
        self.value = value;
    }
}

impl Order {
    /// An empty order with zero delivery cost and no payment method
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discounts.push(discount);
        self
    }
    pub fn set_delivery_cost(mut self, cost: Decimal) -> Self {
        self.delivery_cost = cost;
        self
    }
    pub fn set_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }
    pub fn products(&self) -> &[Product] {
        &self.products
    }
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }
    pub fn products_mut(&mut self) -> &mut Vec<Product> {
        &mut self.products
    }
    pub fn discounts_mut(&mut self) -> &mut Vec<Discount> {
        &mut self.discounts
    }
    pub fn delivery_cost(&self) -> Decimal {
        self.delivery_cost
    }
    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }
    pub fn subtotal(&self) -> Result<Decimal, OrderError> {
        let mut subtotal = Decimal::ZERO;
        for product in &self.products {
            subtotal = subtotal
                .checked_add(product.line_total()?)
                .ok_or(OrderError::TotalOverflow("subtotal"))?;
        }
        Ok(subtotal)
    }
    pub fn discount_total(&self) -> Result<Decimal, OrderError> {
        let mut total = Decimal::ZERO;
        for discount in &self.discounts {
            total = total
                .checked_add(discount.value)
                .ok_or(OrderError::TotalOverflow("discount total"))?;
        }
        Ok(total)
    }
    /// subtotal - discounts + delivery. Not clamped, discounts may exceed the subtotal.
    pub fn total(&self) -> Result<Decimal, OrderError> {
        self.subtotal()?
            .checked_sub(self.discount_total()?)
            .and_then(|net| net.checked_add(self.delivery_cost))
            .ok_or(OrderError::TotalOverflow("total"))
    }
}

impl DeepClone for Product {
    fn deep_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

impl DeepClone for Discount {
    fn deep_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value,
        }
    }
}

impl DeepClone for Order {
    fn deep_clone(&self) -> Self {
        debug!(
            products = self.products.len(),
            discounts = self.discounts.len(),
            "deep cloning order"
        );
        Self {
            products: self.products.iter().map(Product::deep_clone).collect(),
            discounts: self.discounts.iter().map(Discount::deep_clone).collect(),
            delivery_cost: self.delivery_cost,
            payment_method: self.payment_method.clone(),
        }
    }
}
