use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Ident};

pub fn register(input: TokenStream) -> TokenStream {
    let input = match syn::parse::<DeriveInput>(input) {
        Ok(input) => input,
        Err(error) => return error.to_compile_error().into(),
    };

    let Data::Enum(enum_data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "`Register` can only be used on enums")
            .to_compile_error()
            .into();
    };

    let Some(first_variant) = enum_data.variants.first() else {
        return syn::Error::new_spanned(&input.ident, "`Register` needs at least one variant")
            .to_compile_error()
            .into();
    };

    let expanded = compile_output(
        &input.ident,
        &first_variant.ident,
        accessor_imports(enum_data),
        accessor_constructors(enum_data),
        successors(enum_data),
    );

    TokenStream::from(expanded)
}

fn compile_output<T, U, V>(
    name: &Ident,
    first_variant: &Ident,
    imports: T,
    constructors: U,
    successors: V,
) -> TokenStream2
where
    T: Iterator<Item = TokenStream2>,
    U: Iterator<Item = TokenStream2>,
    V: Iterator<Item = TokenStream2>,
{
    quote! {
        #(#imports)*

        impl #name {
            /// Iterate over one freshly constructed instance of every registered accessor.
            pub fn iter(config: &Config) -> AccessorIter<'_> {
                AccessorIter {
                    next: Some(Self::#first_variant),
                    config,
                }
            }

            fn get_accessor(&self, config: &Config) -> Box<dyn SourceCodeAccessor> {
                match self {
                    #(#constructors)*
                }
            }

            fn next(&self) -> Option<Self> {
                match self {
                    #(#successors)*
                }
            }
        }
    }
}

fn accessor_imports(enum_data: &DataEnum) -> impl Iterator<Item = TokenStream2> + '_ {
    enum_data.variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let module = Ident::new(
            &variant_name.to_string().to_lowercase(),
            proc_macro2::Span::call_site(),
        );
        quote! {
            pub use actual::#module::#variant_name;
        }
    })
}

fn accessor_constructors(enum_data: &DataEnum) -> impl Iterator<Item = TokenStream2> + '_ {
    enum_data.variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        quote! {
            Self::#variant_name => Box::new(#variant_name::from_config(config)),
        }
    })
}

fn successors(enum_data: &DataEnum) -> impl Iterator<Item = TokenStream2> + '_ {
    let last = enum_data.variants.len() - 1;
    enum_data
        .variants
        .iter()
        .enumerate()
        .map(move |(i, variant)| {
            let variant_name = &variant.ident;
            if i == last {
                quote! {
                    Self::#variant_name => None,
                }
            } else {
                let next_variant = &enum_data.variants[i + 1].ident;
                quote! {
                    Self::#variant_name => Some(Self::#next_variant),
                }
            }
        })
}
